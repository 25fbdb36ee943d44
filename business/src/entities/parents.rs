use serde_json::Value;

use super::{field, joined};
use crate::envelope::EnvelopeShape;
use crate::row::{Cell, Column, Row, record_id};
use crate::table_view::TableConfig;

pub const ENDPOINT: &str = "/get-parents";

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("children", "Children"),
    ]
}

pub fn config() -> TableConfig {
    TableConfig::new(
        "Parents",
        ENDPOINT,
        EnvelopeShape::keyed("parents"),
        columns(),
        normalize,
    )
}

pub fn normalize(record: &Value) -> Row {
    Row::new()
        .with_id(record_id(record))
        .with("name", field(record, "name"))
        .with("email", field(record, "email"))
        .with("phone", field(record, "phone"))
        .with("children", children(record))
}

/// Children arrive either as objects with a `name` or as plain strings.
fn children(record: &Value) -> Cell {
    let Some(children) = record.get("children").and_then(Value::as_array) else {
        return Cell::Missing;
    };
    joined(children.iter().map(|child| match child {
        Value::Null => String::new(),
        Value::String(name) => name.clone(),
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => child.to_string(),
            Some(other) => other.to_string(),
        },
        other => other.to_string(),
    }))
}
