//! Out-of-band user notifications.
//!
//! Views and API callers never print; they hand messages to a [`Reporter`].
//! The CLI renders them as styled status lines, tests record them.

use std::sync::{Arc, Mutex};

pub trait Reporter: Send + Sync {
    fn error(&self, message: &str);

    fn success(&self, message: &str) {
        log::info!("{message}");
    }
}

/// Sends everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Error(String),
    Success(String),
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                Report::Error(message) => Some(message),
                Report::Success(_) => None,
            })
            .collect()
    }

    fn push(&self, report: Report) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}

impl Reporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.push(Report::Error(message.to_owned()));
    }

    fn success(&self, message: &str) {
        self.push(Report::Success(message.to_owned()));
    }
}
