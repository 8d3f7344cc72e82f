//! Project Row Model
//! Typed representation of the strategy projects table.

use serde::Serialize;

/// Resource requirement of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scale {
    Low,
    Medium,
    High,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Low, Scale::Medium, Scale::High];

    pub fn label(&self) -> &'static str {
        match self {
            Scale::Low => "Low",
            Scale::Medium => "Medium",
            Scale::High => "High",
        }
    }

    /// Parse a normalized (trimmed) label.
    pub fn parse(s: &str) -> Option<Scale> {
        match s {
            "Low" => Some(Scale::Low),
            "Medium" => Some(Scale::Medium),
            "High" => Some(Scale::High),
            _ => None,
        }
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Potential,
    Committed,
    InProgress,
    Completed,
    Rejected,
    Duplicate,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Potential,
        Status::Committed,
        Status::InProgress,
        Status::Completed,
        Status::Rejected,
        Status::Duplicate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Potential => "Potential",
            Status::Committed => "Committed",
            Status::InProgress => "In progress",
            Status::Completed => "Completed",
            Status::Rejected => "Rejected",
            Status::Duplicate => "Duplicate",
        }
    }

    /// Parse a normalized (trimmed, capitalized) label.
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "Potential" => Some(Status::Potential),
            "Committed" => Some(Status::Committed),
            "In progress" => Some(Status::InProgress),
            "Completed" => Some(Status::Completed),
            "Rejected" => Some(Status::Rejected),
            "Duplicate" => Some(Status::Duplicate),
            _ => None,
        }
    }
}

/// One row of the projects table, normalized at load time.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub grouping: String,
    pub scale: Scale,
    pub status: Status,
    pub primary_theme: String,
    pub secondary_themes: String,
    /// Derived: primary theme joined with the secondary themes list.
    pub all_themes: String,
    pub teams: String,
    pub external: String,
    pub start_semester: String,
    pub end_semester: String,
}

/// Column selector for the aggregation and graph builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSel {
    Status,
    Grouping,
    PrimaryTheme,
    SecondaryThemes,
    AllThemes,
    Teams,
    External,
}

impl ColumnSel {
    /// Raw field value for a row.
    pub fn value<'a>(&self, project: &'a Project) -> &'a str {
        match self {
            ColumnSel::Status => project.status.label(),
            ColumnSel::Grouping => &project.grouping,
            ColumnSel::PrimaryTheme => &project.primary_theme,
            ColumnSel::SecondaryThemes => &project.secondary_themes,
            ColumnSel::AllThemes => &project.all_themes,
            ColumnSel::Teams => &project.teams,
            ColumnSel::External => &project.external,
        }
    }
}

/// CSV header mapping. The loader validates all of these against the
/// actual file headers before reading any row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Pid,
    Project,
    Description,
    Grouping,
    Scale,
    Status,
    PrimaryTheme,
    SecondaryThemes,
    Teams,
    External,
    StartSemester,
    EndSemester,
}

impl Header {
    pub const REQUIRED: [Header; 12] = [
        Header::Pid,
        Header::Project,
        Header::Description,
        Header::Grouping,
        Header::Scale,
        Header::Status,
        Header::PrimaryTheme,
        Header::SecondaryThemes,
        Header::Teams,
        Header::External,
        Header::StartSemester,
        Header::EndSemester,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Header::Pid => "Project-id",
            Header::Project => "Project",
            Header::Description => "Description",
            Header::Grouping => "Grouping",
            Header::Scale => "Resource Requirement (Low/Medium/High)",
            Header::Status => {
                "Status (Potential/Committed/In progress/Completed/Rejected/Duplicate)"
            }
            Header::PrimaryTheme => "Primary Library Strategy Theme",
            Header::SecondaryThemes => "Secondary Strategy Theme(s)",
            Header::Teams => "Library Teams involved",
            Header::External => "External Parties involved",
            Header::StartSemester => "Start Semester",
            Header::EndSemester => "End Semester",
        }
    }
}

/// Lowercase everything except the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Split a comma-separated multi-value field into normalized tokens.
/// Tokens are trimmed and capitalized; empty tokens are dropped.
pub fn split_tokens(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|t| capitalize(t.trim()))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("in progress"), "In progress");
        assert_eq!(capitalize("ARCHIVES"), "Archives");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_split_tokens_normalizes() {
        let tokens = split_tokens("digital  services , ARCHIVES");
        assert_eq!(tokens, vec!["Digital  services", "Archives"]);
    }

    #[test]
    fn test_split_tokens_drops_empty() {
        assert_eq!(split_tokens("A, , B,"), vec!["A", "B"]);
        assert!(split_tokens("").is_empty());
        assert!(split_tokens(" , ").is_empty());
    }

    #[test]
    fn test_split_tokens_idempotent() {
        let once = split_tokens("metadata, special collections, IT");
        let again = split_tokens(&once.join(", "));
        assert_eq!(once, again);
    }

    #[test]
    fn test_status_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.label()), Some(status));
        }
        assert_eq!(Status::parse("unknown"), None);
    }

    #[test]
    fn test_scale_round_trip() {
        for scale in Scale::ALL {
            assert_eq!(Scale::parse(scale.label()), Some(scale));
        }
    }
}
