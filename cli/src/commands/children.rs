//! Parent dashboard.

use anyhow::{Context as _, Result};
use brightpath_business::{PLACEHOLDER, Role};
use brightpath_business::api::parents::{
    PerformanceRecord, linked_children, performance, summarize,
};
use inquire::Text;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::context::AppContext;

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Term")]
    term: String,
    #[tabled(rename = "Exam")]
    exam: String,
    #[tabled(rename = "Marks")]
    marks: String,
    #[tabled(rename = "Grade")]
    grade: char,
}

impl From<&PerformanceRecord> for PerformanceRow {
    fn from(record: &PerformanceRecord) -> Self {
        Self {
            subject: record.subject.clone(),
            term: record.term.clone(),
            exam: record.exam_type.clone().unwrap_or_default(),
            marks: format_marks(record.marks),
            grade: record.letter_grade(),
        }
    }
}

/// Whole marks without a trailing `.0`.
pub(crate) fn format_marks(marks: f64) -> String {
    if marks.fract() == 0.0 {
        format!("{marks:.0}")
    } else {
        format!("{marks:.1}")
    }
}

#[instrument(skip_all, name = "children")]
pub async fn run_children(ctx: &AppContext) -> Result<()> {
    let session = ctx.require_session(&[Role::Parent])?;
    let out = &ctx.out;

    out.header(format!("Welcome, {}", session.display_name()));

    let children = linked_children(&ctx.client, &session.id).await?;
    for child in &children {
        out.newline();
        out.print(&child.name);
        out.labeled("Grade", child.grade.as_deref().unwrap_or(PLACEHOLDER), 2);
        if let Some(reg_no) = &child.reg_no {
            out.labeled("Reg No", reg_no, 2);
        }

        let Some(id) = &child.id else {
            out.dim("  No results yet.");
            continue;
        };
        let report = performance(&ctx.client, &id.0).await?;
        if report.performance.is_empty() {
            out.dim(format!(
                "  {}",
                report.message.as_deref().unwrap_or("No results yet.")
            ));
            continue;
        }

        let mut table = Table::new(report.performance.iter().map(PerformanceRow::from));
        table.with(Style::rounded());
        out.print(table);
    }
    Ok(())
}

#[instrument(skip_all, name = "summarize")]
pub async fn run_summarize(ctx: &AppContext, text: Option<String>) -> Result<()> {
    ctx.require_session(&[Role::Parent])?;

    let text = match text {
        Some(text) => text,
        None => Text::new("Text to summarize:")
            .prompt()
            .context("Failed to read text")?,
    };
    if text.trim().is_empty() {
        ctx.out.warning("Please enter some text first.");
        return Ok(());
    }

    let summary = summarize(&ctx.client, &text).await?;
    ctx.out.header("Summary");
    ctx.out
        .print(summary.as_deref().unwrap_or("No summary available."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_marks() {
        assert_eq!(format_marks(84.0), "84");
        assert_eq!(format_marks(58.5), "58.5");
    }

    #[test]
    fn test_row_carries_letter_grade() {
        let record = PerformanceRecord {
            subject: "English".to_owned(),
            marks: 71.0,
            term: "Term 1".to_owned(),
            exam_type: None,
        };
        let row = PerformanceRow::from(&record);
        assert_eq!(row.grade, 'B');
        assert_eq!(row.exam, "");
    }
}
