//! Display-ready rows produced by the per-entity normalizers.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;
use ustr::Ustr;

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

/// A single display value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    Missing,
}

impl Cell {
    /// Map a raw JSON scalar onto a cell. Null becomes [`Cell::Missing`];
    /// booleans, arrays and objects keep their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => Self::Number(n.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Missing => Cow::Borrowed(PLACEHOLDER),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Table column: an interned key into [`Row`] plus its header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: Ustr,
    pub label: &'static str,
}

impl Column {
    pub fn new(key: &str, label: &'static str) -> Self {
        Self {
            key: Ustr::from(key),
            label,
        }
    }
}

/// One normalized record.
///
/// `id` identifies the backend record for edit/delete actions and is not a
/// column. Values not addressed by any column (e.g. a student's parent) may
/// still be stored and read back by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    id: Option<String>,
    values: HashMap<Ustr, Cell>,
}

static MISSING: Cell = Cell::Missing;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn with(mut self, key: &str, cell: impl Into<Cell>) -> Self {
        self.set(key, cell);
        self
    }

    pub fn set(&mut self, key: &str, cell: impl Into<Cell>) {
        self.values.insert(Ustr::from(key), cell.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Value for `key`; absent keys read as [`Cell::Missing`].
    pub fn get(&self, key: Ustr) -> &Cell {
        self.values.get(&key).unwrap_or(&MISSING)
    }

    pub fn display(&self, key: Ustr) -> Cow<'_, str> {
        self.get(key).display()
    }

    /// Case-insensitive substring match against any of `columns`.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, columns: &[Column], needle: &str) -> bool {
        columns
            .iter()
            .any(|column| self.display(column.key).to_lowercase().contains(needle))
    }
}

/// Pull a record id out of a raw record. Numeric and string ids are both in use.
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_display_placeholder() {
        let row = Row::new().with("name", Option::<String>::None);
        assert_eq!(row.display(Ustr::from("name")), PLACEHOLDER);
        assert_eq!(row.display(Ustr::from("never_set")), PLACEHOLDER);
    }

    #[test]
    fn numbers_display_and_match_by_their_text() {
        let columns = [Column::new("marks", "Marks")];
        let row = Row::new().with("marks", 87_i64);
        assert_eq!(row.display(columns[0].key), "87");
        assert!(row.matches(&columns, "87"));
        assert!(!row.matches(&columns, "88"));
    }

    #[test]
    fn matching_is_case_insensitive_across_columns() {
        let columns = [Column::new("name", "Name"), Column::new("grade", "Grade")];
        let row = Row::new().with("name", "Amina Otieno").with("grade", "Grade 4");
        assert!(row.matches(&columns, "otieno"));
        assert!(row.matches(&columns, "grade 4"));
        assert!(!row.matches(&columns, "grade 5"));
    }

    #[test]
    fn cell_from_json_scalars() {
        assert_eq!(Cell::from_json(&Value::Null), Cell::Missing);
        assert_eq!(Cell::from_json(&serde_json::json!("x")), Cell::from("x"));
        assert_eq!(Cell::from_json(&serde_json::json!(12)), Cell::from(12_i64));
        assert_eq!(Cell::from_json(&serde_json::json!(true)), Cell::from("true"));
    }

    #[test]
    fn record_ids_accept_numbers_and_strings() {
        assert_eq!(record_id(&serde_json::json!({"id": 7})), Some("7".to_owned()));
        assert_eq!(
            record_id(&serde_json::json!({"id": "a1b2"})),
            Some("a1b2".to_owned())
        );
        assert_eq!(record_id(&serde_json::json!({"name": "x"})), None);
    }
}
