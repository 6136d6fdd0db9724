//! Column role data structures.

use serde::{Deserialize, Serialize};

/// Semantic purpose of a feed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Date,
    Title,
    Description,
    Location,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Date => "date",
            ColumnRole::Title => "title",
            ColumnRole::Description => "description",
            ColumnRole::Location => "location",
        }
    }
}

/// Zero-based column position for each role.
///
/// `date` and `title` always resolve to a column; the optional roles are
/// `None` when no header matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub date: usize,
    pub title: usize,
    pub description: Option<usize>,
    pub location: Option<usize>,
}

impl ColumnRoleMap {
    /// Column assigned to `role`, if any.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Date => Some(self.date),
            ColumnRole::Title => Some(self.title),
            ColumnRole::Description => self.description,
            ColumnRole::Location => self.location,
        }
    }

    /// Cell holding `role` in a tokenized row.
    ///
    /// `None` when the role is absent or the row is too short.
    pub fn cell<'a>(&self, role: ColumnRole, cells: &'a [String]) -> Option<&'a str> {
        self.get(role)
            .and_then(|idx| cells.get(idx))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup() {
        let roles = ColumnRoleMap {
            date: 0,
            title: 1,
            description: None,
            location: Some(5),
        };
        let cells = vec!["2024-01-01".to_string(), "Launch".to_string()];

        assert_eq!(roles.cell(ColumnRole::Date, &cells), Some("2024-01-01"));
        assert_eq!(roles.cell(ColumnRole::Title, &cells), Some("Launch"));
        assert_eq!(roles.cell(ColumnRole::Description, &cells), None);
        assert_eq!(roles.cell(ColumnRole::Location, &cells), None);
    }
}
