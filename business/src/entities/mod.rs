//! The three admin collections and their row normalizers.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::row::Cell;
use crate::table_view::TableConfig;

pub mod parents;
pub mod students;
pub mod teachers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Student,
    Teacher,
    Parent,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Student, Self::Teacher, Self::Parent];

    /// Singular path segment, as used by `/delete-{kind}/{id}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Teacher => "teachers",
            Self::Parent => "parents",
        }
    }

    /// Table configuration with the default page size.
    pub fn config(self) -> TableConfig {
        match self {
            Self::Student => students::config(),
            Self::Teacher => teachers::config(),
            Self::Parent => parents::config(),
        }
    }

    pub fn delete_path(self, id: &str) -> String {
        format!("/delete-{}/{id}", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity '{0}', expected one of: students, teachers, parents")]
pub struct UnknownEntity(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "students" => Ok(Self::Student),
            "teacher" | "teachers" => Ok(Self::Teacher),
            "parent" | "parents" => Ok(Self::Parent),
            _ => Err(UnknownEntity(s.to_owned())),
        }
    }
}

/// `record[key]` as a cell; absent keys are missing.
fn field(record: &Value, key: &str) -> Cell {
    record.get(key).map_or(Cell::Missing, Cell::from_json)
}

/// Join non-empty parts with `", "`; nothing left means missing.
fn joined<I>(parts: I) -> Cell
where
    I: IntoIterator<Item = String>,
{
    let parts: Vec<String> = parts.into_iter().filter(|part| !part.trim().is_empty()).collect();
    if parts.is_empty() {
        Cell::Missing
    } else {
        Cell::Text(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_names() {
        assert_eq!("students".parse::<EntityKind>(), Ok(EntityKind::Student));
        assert_eq!("Teacher".parse::<EntityKind>(), Ok(EntityKind::Teacher));
        assert_eq!(" parents ".parse::<EntityKind>(), Ok(EntityKind::Parent));
        assert!("subjects".parse::<EntityKind>().is_err());
    }

    #[test]
    fn delete_paths_use_singular_names() {
        assert_eq!(EntityKind::Student.delete_path("12"), "/delete-student/12");
        assert_eq!(EntityKind::Teacher.delete_path("7"), "/delete-teacher/7");
        assert_eq!(EntityKind::Parent.delete_path("3"), "/delete-parent/3");
    }

    #[test]
    fn every_kind_has_a_config() {
        for kind in EntityKind::ALL {
            let config = kind.config();
            assert_eq!(config.endpoint, format!("/get-{}", kind.plural()));
            assert!(!config.columns.is_empty());
        }
    }

    #[test]
    fn joined_drops_blanks() {
        assert_eq!(
            joined(["a".to_owned(), String::new(), "b".to_owned()]),
            Cell::from("a, b")
        );
        assert_eq!(joined(Vec::new()), Cell::Missing);
        assert_eq!(joined([String::new()]), Cell::Missing);
    }
}
