use serde::Deserialize;

use super::{ApiResult, Id, fetch_list, require};
use crate::envelope::EnvelopeShape;
use crate::http::Client;

/// Upload progress of one grade for a term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GradeSummary {
    #[serde(rename = "class")]
    pub grade: String,
    pub total_subjects: u32,
    pub uploaded: u32,
    pub pending: u32,
    pub status: String,
}

impl GradeSummary {
    pub fn is_complete(&self) -> bool {
        self.total_subjects > 0 && self.uploaded >= self.total_subjects
    }
}

/// GET `/admin/results-summary?term=...`
pub async fn results_summary(client: &Client, term: &str) -> ApiResult<Vec<GradeSummary>> {
    let term = require("Term", term)?;
    fetch_list(
        client.get("/admin/results-summary").query("term", term),
        &EnvelopeShape::strict("summary"),
    )
    .await
}

/// One subject row of a grade's results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubjectResults {
    pub subject: String,
    #[serde(default)]
    pub teacher: Option<String>,
    pub uploaded: u32,
    pub pending: u32,
    /// `None` until marks exist for the subject.
    #[serde(default)]
    pub average_marks: Option<f64>,
}

/// GET `/admin/class-results/{grade}`
pub async fn class_results(client: &Client, grade: &str) -> ApiResult<Vec<SubjectResults>> {
    let grade = require("Grade", grade)?;
    fetch_list(
        client.get(&format!("/admin/class-results/{grade}")),
        &EnvelopeShape::strict("subjects"),
    )
    .await
}

/// One uploaded mark as the admin feed shows it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultEntry {
    pub student_reg: Id,
    pub student_name: String,
    pub grade: String,
    pub subject: String,
    pub teacher: String,
    pub marks: f64,
    pub term: String,
    pub exam_type: String,
}

/// GET `/admin/view-results`, optionally narrowed to one term.
pub async fn view_results(client: &Client, term: Option<&str>) -> ApiResult<Vec<ResultEntry>> {
    let mut request = client.get("/admin/view-results");
    if let Some(term) = term.map(str::trim).filter(|term| !term.is_empty()) {
        request = request.query("term", term);
    }
    fetch_list(request, &EnvelopeShape::strict("results")).await
}
