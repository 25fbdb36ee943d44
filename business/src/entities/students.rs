use serde_json::Value;

use super::field;
use crate::envelope::EnvelopeShape;
use crate::row::{Column, Row, record_id};
use crate::table_view::TableConfig;

pub const ENDPOINT: &str = "/get-students";

/// Non-column attribute holding the linked parent's name.
pub const PARENT_KEY: &str = "parent";

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("reg_no", "Reg No"),
        Column::new("name", "Name"),
        Column::new("grade", "Grade"),
        Column::new("gender", "Gender"),
        Column::new("date_of_birth", "Date of Birth"),
    ]
}

pub fn config() -> TableConfig {
    TableConfig::new(
        "Students",
        ENDPOINT,
        EnvelopeShape::keyed("students"),
        columns(),
        normalize,
    )
}

pub fn normalize(record: &Value) -> Row {
    let mut row = Row::new().with_id(record_id(record));
    for key in ["reg_no", "name", "grade", "gender", "date_of_birth"] {
        row.set(key, field(record, key));
    }
    row.with(PARENT_KEY, field(record, "parent_name"))
}
