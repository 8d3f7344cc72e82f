//! Value Count Aggregation
//! Bar chart series built from a filtered row subset.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{split_tokens, ColumnSel, Project, Scale};

/// One bar series: the counts for a single resource scale.
#[derive(Debug, Clone, Serialize)]
pub struct BarSeries {
    pub scale: Scale,
    /// (label, count) sorted ascending by label so every series shares a
    /// stable category axis.
    pub bars: Vec<(String, u32)>,
}

/// Count values of `column` across the rows.
///
/// With `split` the column is treated as a comma-separated multi-value
/// field: every normalized token counts once per occurrence, so a token
/// repeated within one row's field is counted each time it appears.
/// Without `split` the field value is counted verbatim.
pub fn value_counts(rows: &[&Project], column: ColumnSel, split: bool) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    for row in rows {
        let value = column.value(row);
        if split {
            for token in split_tokens(value) {
                *counts.entry(token).or_insert(0) += 1;
            }
        } else {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }

    counts.into_iter().collect()
}

/// Build one series per requested scale, in the order given.
///
/// `scales` must already be resolved (an empty selection is the caller's
/// concern). Scales with no counted values produce no series at all; a
/// zero-height series is never emitted.
pub fn bar_series(
    rows: &[&Project],
    column: ColumnSel,
    scales: &[Scale],
    split: bool,
) -> Vec<BarSeries> {
    let mut series = Vec::new();

    for &scale in scales {
        let subset: Vec<&Project> = rows
            .iter()
            .filter(|p| p.scale == scale)
            .copied()
            .collect();
        let bars = value_counts(&subset, column, split);
        if !bars.is_empty() {
            series.push(BarSeries { scale, bars });
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Status;

    fn project(id: &str, scale: Scale, themes: &str) -> Project {
        Project {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            grouping: "Collections".to_string(),
            scale,
            status: Status::Committed,
            primary_theme: "T1".to_string(),
            secondary_themes: themes.to_string(),
            all_themes: format!("T1, {themes}"),
            teams: String::new(),
            external: String::new(),
            start_semester: String::new(),
            end_semester: String::new(),
        }
    }

    #[test]
    fn test_verbatim_counts() {
        let a = project("1", Scale::Low, "");
        let b = project("2", Scale::Low, "");
        let rows = vec![&a, &b];
        let counts = value_counts(&rows, ColumnSel::Grouping, false);
        assert_eq!(counts, vec![("Collections".to_string(), 2)]);
    }

    #[test]
    fn test_split_counts_each_occurrence() {
        // A token repeated inside one field counts per occurrence.
        let a = project("1", Scale::Low, "open access, Open Access, preservation");
        let rows = vec![&a];
        let counts = value_counts(&rows, ColumnSel::SecondaryThemes, true);
        assert_eq!(
            counts,
            vec![("Open access".to_string(), 2), ("Preservation".to_string(), 1)]
        );
    }

    #[test]
    fn test_split_skips_empty_tokens() {
        let a = project("1", Scale::Low, "");
        let b = project("2", Scale::Low, "preservation, ");
        let rows = vec![&a, &b];
        let counts = value_counts(&rows, ColumnSel::SecondaryThemes, true);
        assert_eq!(counts, vec![("Preservation".to_string(), 1)]);
    }

    #[test]
    fn test_empty_scale_series_are_skipped() {
        let a = project("1", Scale::Low, "preservation");
        let rows = vec![&a];
        let series = bar_series(&rows, ColumnSel::SecondaryThemes, &Scale::ALL, true);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].scale, Scale::Low);
    }

    #[test]
    fn test_series_follow_requested_scale_order() {
        let a = project("1", Scale::High, "x");
        let b = project("2", Scale::Low, "y");
        let rows = vec![&a, &b];
        let series = bar_series(&rows, ColumnSel::SecondaryThemes, &Scale::ALL, true);
        assert_eq!(series[0].scale, Scale::Low);
        assert_eq!(series[1].scale, Scale::High);
    }
}
