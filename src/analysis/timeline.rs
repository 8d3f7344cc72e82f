//! Timeline (Gantt) Builder
//! Maps semester period codes to date ranges and derives progress ratings.

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::data::{Project, Scale, Status};

/// Statuses that can appear on the timeline. Other statuses never produce
/// an interval even when selected.
pub const TIMELINE_STATUSES: [Status; 3] =
    [Status::Committed, Status::InProgress, Status::Completed];

/// Period code grammar: an academic year spanning two calendar years plus
/// a semester index, e.g. `2021/2022-02`.
static SEMESTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^20\d{2}/20\d{2}-0[1-3]$").expect("semester pattern"));

/// Traffic-light rating relative to today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Progress {
    Green,
    Amber,
    Red,
}

impl Progress {
    pub const ALL: [Progress; 3] = [Progress::Green, Progress::Amber, Progress::Red];

    pub fn label(&self) -> &'static str {
        match self {
            Progress::Green => "Green",
            Progress::Amber => "Amber (due to finish)",
            Progress::Red => "Red (late)",
        }
    }
}

/// One interval of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttTask {
    pub task: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub scale: Scale,
    pub progress: Progress,
}

pub fn valid_semester(code: &str) -> bool {
    SEMESTER_RE.is_match(code)
}

/// Concrete (start, end) dates of one semester.
///
/// Semester 01 runs Sept-Dec of the first year, 02 runs Jan-Apr of the
/// second year and 03 runs May-Aug of the second year.
pub fn semester_range(code: &str) -> Option<(NaiveDate, NaiveDate)> {
    if !valid_semester(code) {
        return None;
    }

    let (years, semester) = code.split_once('-')?;
    let (first, second) = years.split_once('/')?;
    let first: i32 = first.parse().ok()?;
    let second: i32 = second.parse().ok()?;

    match semester {
        "01" => Some((
            NaiveDate::from_ymd_opt(first, 9, 1)?,
            NaiveDate::from_ymd_opt(first, 12, 31)?,
        )),
        "02" => Some((
            NaiveDate::from_ymd_opt(second, 1, 1)?,
            NaiveDate::from_ymd_opt(second, 4, 30)?,
        )),
        _ => Some((
            NaiveDate::from_ymd_opt(second, 5, 1)?,
            NaiveDate::from_ymd_opt(second, 8, 31)?,
        )),
    }
}

/// Progress rating for a project ending on `finish`.
///
/// Completed projects are always Green. Otherwise a project past its end
/// date is Red, one ending within a month is Amber.
pub fn progress(status: Status, finish: NaiveDate, today: NaiveDate) -> Progress {
    if status == Status::Completed {
        return Progress::Green;
    }
    if today > finish {
        Progress::Red
    } else if today + Months::new(1) > finish {
        Progress::Amber
    } else {
        Progress::Green
    }
}

/// Display label for a task: project id plus the name truncated to 40
/// characters.
pub fn task_label(id: &str, name: &str) -> String {
    let truncated: String = if name.chars().count() > 40 {
        let head: String = name.chars().take(40).collect();
        format!("{head}....")
    } else {
        name.to_string()
    };
    format!("{id} - {truncated}")
}

/// Build one interval per project with parseable start and end codes.
///
/// Rows outside the timeline-relevant statuses or with malformed period
/// codes are skipped, never an error.
pub fn build_timeline(rows: &[&Project], today: NaiveDate) -> Vec<GanttTask> {
    let mut tasks = Vec::new();

    for row in rows {
        if !TIMELINE_STATUSES.contains(&row.status) {
            continue;
        }

        let task = task_label(&row.id, &row.name);
        let (Some((start, _)), Some((_, finish))) = (
            semester_range(&row.start_semester),
            semester_range(&row.end_semester),
        ) else {
            log::info!("skipping {task} - failed to load valid semester values");
            continue;
        };

        tasks.push(GanttTask {
            progress: progress(row.status, finish, today),
            task,
            start,
            finish,
            scale: row.scale,
        });
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(id: &str, status: Status, start: &str, end: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {id}"),
            description: String::new(),
            grouping: String::new(),
            scale: Scale::Medium,
            status,
            primary_theme: String::new(),
            secondary_themes: String::new(),
            all_themes: String::new(),
            teams: String::new(),
            external: String::new(),
            start_semester: start.to_string(),
            end_semester: end.to_string(),
        }
    }

    #[test]
    fn test_semester_date_mapping() {
        assert_eq!(
            semester_range("2021/2022-01"),
            Some((date(2021, 9, 1), date(2021, 12, 31)))
        );
        assert_eq!(
            semester_range("2021/2022-02"),
            Some((date(2022, 1, 1), date(2022, 4, 30)))
        );
        assert_eq!(
            semester_range("2021/2022-03"),
            Some((date(2022, 5, 1), date(2022, 8, 31)))
        );
    }

    #[test]
    fn test_malformed_codes_rejected() {
        assert!(!valid_semester(""));
        assert!(!valid_semester("2021/2022-04"));
        assert!(!valid_semester("2021-01"));
        assert!(!valid_semester("1999/2000-01"));
        assert!(!valid_semester(" 2021/2022-01"));
        assert_eq!(semester_range("2021/2022"), None);
    }

    #[test]
    fn test_completed_is_always_green() {
        let finish = date(2020, 8, 31);
        assert_eq!(
            progress(Status::Completed, finish, date(2026, 1, 1)),
            Progress::Green
        );
    }

    #[test]
    fn test_progress_thresholds() {
        let finish = date(2022, 4, 30);
        // Past the end date.
        assert_eq!(
            progress(Status::InProgress, finish, date(2022, 5, 1)),
            Progress::Red
        );
        // Within a month of the end date.
        assert_eq!(
            progress(Status::InProgress, finish, date(2022, 4, 15)),
            Progress::Amber
        );
        // Comfortably before the end date.
        assert_eq!(
            progress(Status::Committed, finish, date(2022, 1, 1)),
            Progress::Green
        );
    }

    #[test]
    fn test_rows_with_bad_codes_are_skipped() {
        let ok = project("1", Status::Committed, "2021/2022-01", "2021/2022-02");
        let bad = project("2", Status::Committed, "sometime", "2021/2022-02");
        let rows = vec![&ok, &bad];

        let tasks = build_timeline(&rows, date(2021, 10, 1));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].start, date(2021, 9, 1));
        assert_eq!(tasks[0].finish, date(2022, 4, 30));
    }

    #[test]
    fn test_irrelevant_statuses_are_excluded() {
        let potential = project("1", Status::Potential, "2021/2022-01", "2021/2022-01");
        let rejected = project("2", Status::Rejected, "2021/2022-01", "2021/2022-01");
        let rows = vec![&potential, &rejected];
        assert!(build_timeline(&rows, date(2021, 10, 1)).is_empty());
    }

    #[test]
    fn test_task_label_truncation() {
        let short = task_label("7", "Digitize maps");
        assert_eq!(short, "7 - Digitize maps");

        let long_name = "A very long project name that keeps going well past forty characters";
        let label = task_label("8", long_name);
        assert_eq!(label, format!("8 - {}....", &long_name[..40]));
    }
}
