use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::{field, joined};
use crate::envelope::EnvelopeShape;
use crate::row::{Cell, Column, Row, record_id};
use crate::table_view::TableConfig;

pub const ENDPOINT: &str = "/get-teachers";

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("department", "Department"),
        Column::new("subjects", "Subjects"),
        Column::new("created_at", "Joined"),
    ]
}

pub fn config() -> TableConfig {
    TableConfig::new(
        "Teachers",
        ENDPOINT,
        EnvelopeShape::keyed("teachers"),
        columns(),
        normalize,
    )
}

pub fn normalize(record: &Value) -> Row {
    Row::new()
        .with_id(record_id(record))
        .with("name", field(record, "name"))
        .with("email", field(record, "email"))
        .with("department", field(record, "department"))
        .with("subjects", subjects(record))
        .with("created_at", created_at(record))
}

/// `teacher_subjects[].subjects.name`, the join-table shape the backend returns.
fn subjects(record: &Value) -> Cell {
    let Some(links) = record.get("teacher_subjects").and_then(Value::as_array) else {
        return Cell::Missing;
    };
    joined(links.iter().map(|link| {
        link.pointer("/subjects/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_owned()
    }))
}

fn created_at(record: &Value) -> Cell {
    match record.get("created_at") {
        Some(Value::String(raw)) if !raw.trim().is_empty() => {
            Cell::Text(format_date(raw).unwrap_or_else(|| raw.clone()))
        }
        _ => Cell::Missing,
    }
}

/// Render a backend timestamp as `M/D/YYYY`, using the date as written.
pub fn format_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%-m/%-d/%Y").to_string())
}
