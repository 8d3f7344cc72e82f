//! Row Filtering
//! Resolved filter predicates applied before every panel recompute.

use crate::data::model::{Project, Scale, Status};

/// Filter selections from the control panel.
///
/// An empty status or scale selection means "all": it is resolved to the
/// full enum domain before any row is tested, never treated as
/// "exclude everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub statuses: Vec<Status>,
    pub scales: Vec<Scale>,
    pub teams: Vec<String>,
    pub primary_theme: Option<String>,
}

impl Filters {
    /// Status set with the empty-means-all convention resolved.
    pub fn resolved_statuses(&self) -> Vec<Status> {
        if self.statuses.is_empty() {
            Status::ALL.to_vec()
        } else {
            self.statuses.clone()
        }
    }

    /// Scale set with the empty-means-all convention resolved.
    pub fn resolved_scales(&self) -> Vec<Scale> {
        if self.scales.is_empty() {
            Scale::ALL.to_vec()
        } else {
            self.scales.clone()
        }
    }

    fn matches_teams(&self, project: &Project) -> bool {
        if self.teams.is_empty() {
            return true;
        }
        let haystack = project.teams.to_lowercase();
        self.teams
            .iter()
            .any(|team| haystack.contains(&team.to_lowercase()))
    }

    fn matches_theme(&self, project: &Project) -> bool {
        match &self.primary_theme {
            Some(theme) => project.primary_theme == *theme,
            None => true,
        }
    }

    /// Apply all predicates to the table.
    ///
    /// `use_status` and `use_teams` let a panel opt out of those two
    /// predicates; the status bar counts every status regardless of the
    /// status selection, and the team-centric panels ignore the teams
    /// selection.
    pub fn apply<'a>(
        &self,
        projects: &'a [Project],
        use_status: bool,
        use_teams: bool,
    ) -> Vec<&'a Project> {
        let statuses = self.resolved_statuses();
        let scales = self.resolved_scales();

        projects
            .iter()
            .filter(|p| !use_status || statuses.contains(&p.status))
            .filter(|p| scales.contains(&p.scale))
            .filter(|p| !use_teams || self.matches_teams(p))
            .filter(|p| self.matches_theme(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Project;

    fn project(id: &str, status: Status, scale: Scale, teams: &str, ptheme: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {id}"),
            description: String::new(),
            grouping: "Ops".to_string(),
            scale,
            status,
            primary_theme: ptheme.to_string(),
            secondary_themes: String::new(),
            all_themes: ptheme.to_string(),
            teams: teams.to_string(),
            external: String::new(),
            start_semester: String::new(),
            end_semester: String::new(),
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project("1", Status::Committed, Scale::Low, "Metadata, IT", "T1"),
            project("2", Status::Potential, Scale::High, "Special Collections", "T2"),
            project("3", Status::Completed, Scale::Medium, "IT", "T1"),
        ]
    }

    #[test]
    fn test_empty_sets_resolve_to_full_domain() {
        let filters = Filters::default();
        assert_eq!(filters.resolved_statuses(), Status::ALL.to_vec());
        assert_eq!(filters.resolved_scales(), Scale::ALL.to_vec());
    }

    #[test]
    fn test_empty_selection_matches_all() {
        let table = sample();
        let filters = Filters::default();
        assert_eq!(filters.apply(&table, true, true).len(), 3);
    }

    #[test]
    fn test_status_filter() {
        let table = sample();
        let filters = Filters {
            statuses: vec![Status::Committed, Status::Completed],
            ..Filters::default()
        };
        let rows = filters.apply(&table, true, true);
        assert_eq!(rows.len(), 2);
        // The same selection is ignored when the panel opts out.
        assert_eq!(filters.apply(&table, false, true).len(), 3);
    }

    #[test]
    fn test_teams_filter_is_case_insensitive_substring() {
        let table = sample();
        let filters = Filters {
            teams: vec!["it".to_string()],
            ..Filters::default()
        };
        let rows = filters.apply(&table, true, true);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[1].id, "3");
    }

    #[test]
    fn test_theme_filter() {
        let table = sample();
        let filters = Filters {
            primary_theme: Some("T1".to_string()),
            ..Filters::default()
        };
        assert_eq!(filters.apply(&table, true, true).len(), 2);
    }

    #[test]
    fn test_unknown_theme_matches_nothing() {
        let table = sample();
        let filters = Filters {
            primary_theme: Some("T9".to_string()),
            ..Filters::default()
        };
        assert!(filters.apply(&table, true, true).is_empty());
    }
}
