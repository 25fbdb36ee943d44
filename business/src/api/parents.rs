//! Parent dashboard: linked children, their released results, and text
//! summaries.

use serde::{Deserialize, Serialize};

use super::{ApiResult, Id, decode, fetch_list, require, send, with_json};
use crate::envelope::EnvelopeShape;
use crate::http::Client;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkedChild {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub reg_no: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

/// GET `/parents/{id}/students`
pub async fn linked_children(client: &Client, parent_id: &str) -> ApiResult<Vec<LinkedChild>> {
    let parent_id = require("Parent id", parent_id)?;
    fetch_list(
        client.get(&format!("/parents/{parent_id}/students")),
        &EnvelopeShape::strict("students"),
    )
    .await
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PerformanceRecord {
    pub subject: String,
    pub marks: f64,
    pub term: String,
    #[serde(default)]
    pub exam_type: Option<String>,
}

impl PerformanceRecord {
    pub fn letter_grade(&self) -> char {
        letter_grade(self.marks)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub performance: Vec<PerformanceRecord>,
    /// Set when there is nothing released yet.
    #[serde(default)]
    pub message: Option<String>,
}

/// GET `/students/{id}/performance`. Only released terms are returned.
pub async fn performance(client: &Client, student_id: &str) -> ApiResult<Performance> {
    let student_id = require("Student id", student_id)?;
    let response = send(client.get(&format!("/students/{student_id}/performance"))).await?;
    decode(&response)
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    summary: Option<String>,
}

/// POST `/summarize`. `None` when the backend had nothing to say.
pub async fn summarize(client: &Client, text: &str) -> ApiResult<Option<String>> {
    let text = require("Text", text)?;
    let request = with_json(client.post("/summarize"), &SummarizeRequest { text })?;
    let response: SummarizeResponse = decode(&send(request).await?)?;
    Ok(response
        .summary
        .filter(|summary| !summary.trim().is_empty()))
}

/// 80+ A, 70+ B, 60+ C, 50+ D, anything else E.
pub fn letter_grade(marks: f64) -> char {
    match marks {
        m if m >= 80.0 => 'A',
        m if m >= 70.0 => 'B',
        m if m >= 60.0 => 'C',
        m if m >= 50.0 => 'D',
        _ => 'E',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_grade_boundaries() {
        assert_eq!(letter_grade(100.0), 'A');
        assert_eq!(letter_grade(80.0), 'A');
        assert_eq!(letter_grade(79.5), 'B');
        assert_eq!(letter_grade(70.0), 'B');
        assert_eq!(letter_grade(60.0), 'C');
        assert_eq!(letter_grade(50.0), 'D');
        assert_eq!(letter_grade(49.9), 'E');
        assert_eq!(letter_grade(0.0), 'E');
    }

    #[test]
    fn empty_performance_keeps_message() {
        let parsed: Performance = serde_json::from_str(
            r#"{"success": true, "performance": [], "message": "Results not yet released."}"#,
        )
        .unwrap();
        assert!(parsed.performance.is_empty());
        assert_eq!(parsed.message.as_deref(), Some("Results not yet released."));
    }
}
