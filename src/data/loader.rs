//! CSV Data Loader Module
//! Loads the projects table with Polars and normalizes it into typed rows.

use polars::prelude::*;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::model::{capitalize, split_tokens, Header, Project, Scale, Status};

/// Environment variable overriding the default data source. Accepts a
/// filesystem path or an http(s) URL.
pub const SOURCE_ENV: &str = "STRATBOARD_SOURCE";

/// Fallback CSV path in the working directory.
pub const DEFAULT_SOURCE: &str = "projects.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to fetch remote source: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Required column missing from input table: {0}")]
    MissingColumn(&'static str),
    #[error("No data loaded")]
    NoData,
}

/// Where the projects table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// Source from the environment override, else the default local file
    /// when it exists.
    pub fn resolve() -> Option<Source> {
        if let Ok(value) = std::env::var(SOURCE_ENV) {
            if value.starts_with("http://") || value.starts_with("https://") {
                return Some(Source::Url(value));
            }
            return Some(Source::Path(PathBuf::from(value)));
        }

        let default = PathBuf::from(DEFAULT_SOURCE);
        default.exists().then_some(Source::Path(default))
    }

    /// Short name for the status line.
    pub fn display_name(&self) -> String {
        match self {
            Source::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Url(url) => url.clone(),
        }
    }
}

/// The immutable in-memory projects table plus the filter domains
/// observed in the data.
#[derive(Debug, Clone, Default)]
pub struct ProjectTable {
    pub projects: Vec<Project>,
    /// Distinct non-empty primary themes, sorted.
    pub primary_themes: Vec<String>,
    /// Distinct normalized team tokens, sorted.
    pub team_options: Vec<String>,
}

impl ProjectTable {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }
}

/// Loads the projects table from a path or URL.
pub struct TableLoader;

impl TableLoader {
    /// Load and normalize the table from the given source.
    pub fn load(source: &Source) -> Result<ProjectTable, LoaderError> {
        let df = match source {
            Source::Path(path) => Self::read_path(path)?,
            Source::Url(url) => Self::read_url(url)?,
        };
        Self::from_dataframe(&df)
    }

    fn read_path(path: &PathBuf) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path.to_string_lossy().as_ref())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    fn read_url(url: &str) -> Result<DataFrame, LoaderError> {
        let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;
        Ok(df)
    }

    /// Validate headers and materialize typed rows.
    pub fn from_dataframe(df: &DataFrame) -> Result<ProjectTable, LoaderError> {
        for header in Header::REQUIRED {
            if df.column(header.label()).is_err() {
                return Err(LoaderError::MissingColumn(header.label()));
            }
        }
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        let mut projects = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let id = Self::cell(df, Header::Pid, i);
            let scale_raw = Self::cell(df, Header::Scale, i).trim().to_string();
            let status_raw = capitalize(Self::cell(df, Header::Status, i).trim());

            let Some(scale) = Scale::parse(&scale_raw) else {
                log::warn!("skipping project {id}: unknown resource requirement '{scale_raw}'");
                continue;
            };
            let Some(status) = Status::parse(&status_raw) else {
                log::warn!("skipping project {id}: unknown status '{status_raw}'");
                continue;
            };

            let primary_theme = Self::cell(df, Header::PrimaryTheme, i);
            let secondary_themes = Self::cell(df, Header::SecondaryThemes, i);
            let all_themes = format!("{}, {}", primary_theme, secondary_themes);

            projects.push(Project {
                id,
                name: Self::cell(df, Header::Project, i),
                description: Self::cell(df, Header::Description, i),
                grouping: Self::cell(df, Header::Grouping, i),
                scale,
                status,
                primary_theme,
                secondary_themes,
                all_themes,
                teams: Self::cell(df, Header::Teams, i),
                external: Self::cell(df, Header::External, i),
                start_semester: Self::cell(df, Header::StartSemester, i),
                end_semester: Self::cell(df, Header::EndSemester, i),
            });
        }

        let primary_themes: BTreeSet<String> = projects
            .iter()
            .map(|p| p.primary_theme.clone())
            .filter(|t| !t.is_empty())
            .collect();
        let team_options: BTreeSet<String> = projects
            .iter()
            .flat_map(|p| split_tokens(&p.teams))
            .collect();

        Ok(ProjectTable {
            projects,
            primary_themes: primary_themes.into_iter().collect(),
            team_options: team_options.into_iter().collect(),
        })
    }

    /// Cell value as a display string, empty for nulls. Missing values in
    /// optional columns become empty strings rather than errors.
    fn cell(df: &DataFrame, header: Header, idx: usize) -> String {
        df.column(header.label())
            .ok()
            .and_then(|col| col.get(idx).ok())
            .map(|val| {
                if val.is_null() {
                    String::new()
                } else {
                    val.to_string().trim_matches('"').to_string()
                }
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[(&str, &str, &str)]) -> DataFrame {
        let ids: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
        let scales: Vec<String> = rows.iter().map(|r| r.1.to_string()).collect();
        let statuses: Vec<String> = rows.iter().map(|r| r.2.to_string()).collect();
        let blank: Vec<String> = rows.iter().map(|_| String::new()).collect();

        DataFrame::new(vec![
            Column::new(Header::Pid.label().into(), ids),
            Column::new(Header::Project.label().into(), blank.clone()),
            Column::new(Header::Description.label().into(), blank.clone()),
            Column::new(Header::Grouping.label().into(), blank.clone()),
            Column::new(Header::Scale.label().into(), scales),
            Column::new(Header::Status.label().into(), statuses),
            Column::new(Header::PrimaryTheme.label().into(), blank.clone()),
            Column::new(Header::SecondaryThemes.label().into(), blank.clone()),
            Column::new(Header::Teams.label().into(), blank.clone()),
            Column::new(Header::External.label().into(), blank.clone()),
            Column::new(Header::StartSemester.label().into(), blank.clone()),
            Column::new(Header::EndSemester.label().into(), blank),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let df = DataFrame::new(vec![Column::new(
            Header::Pid.label().into(),
            vec!["1".to_string()],
        )])
        .unwrap();

        match TableLoader::from_dataframe(&df) {
            Err(LoaderError::MissingColumn(name)) => {
                assert_eq!(name, Header::Project.label());
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_status_is_trimmed_and_capitalized() {
        let df = frame(&[("1", "Low", "  in progress ")]);
        let table = TableLoader::from_dataframe(&df).unwrap();
        assert_eq!(table.projects.len(), 1);
        assert_eq!(table.projects[0].status, Status::InProgress);
    }

    #[test]
    fn test_unknown_enum_rows_are_skipped() {
        let df = frame(&[
            ("1", "Low", "Committed"),
            ("2", "Gigantic", "Committed"),
            ("3", "High", "Paused"),
        ]);
        let table = TableLoader::from_dataframe(&df).unwrap();
        assert_eq!(table.projects.len(), 1);
        assert_eq!(table.projects[0].id, "1");
    }

    #[test]
    fn test_team_options_are_split_and_sorted() {
        let mut df = frame(&[("1", "Low", "Committed"), ("2", "High", "Potential")]);
        df.replace(
            Header::Teams.label(),
            Series::new(
                Header::Teams.label().into(),
                vec!["metadata, IT".to_string(), "it, Special Collections".to_string()],
            ),
        )
        .unwrap();

        let table = TableLoader::from_dataframe(&df).unwrap();
        assert_eq!(table.team_options, vec!["It", "Metadata", "Special collections"]);
    }
}
