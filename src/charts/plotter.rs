//! Chart Plotter Module
//! Interactive bar and Gantt charts built on egui_plot.

use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot, VLine};
use std::collections::BTreeSet;

use crate::analysis::{BarSeries, GanttTask, Progress};
use crate::data::Scale;

/// Fixed palette for resource scales.
pub fn scale_color(scale: Scale) -> Color32 {
    match scale {
        Scale::Low => Color32::from_rgb(39, 119, 180),
        Scale::Medium => Color32::from_rgb(225, 127, 14),
        Scale::High => Color32::from_rgb(44, 160, 44),
    }
}

/// Fixed progress palette for the Gantt chart.
pub fn progress_color(progress: Progress) -> Color32 {
    match progress {
        Progress::Green => Color32::from_rgb(44, 160, 44),
        Progress::Amber => Color32::from_rgb(225, 127, 14),
        Progress::Red => Color32::from_rgb(255, 0, 0),
    }
}

/// How per-scale series are arranged on a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarMode {
    #[default]
    Stack,
    Group,
}

impl BarMode {
    pub fn label(&self) -> &'static str {
        match self {
            BarMode::Stack => "Stack Resource Requirements",
            BarMode::Group => "Group Resource Requirements",
        }
    }
}

/// Color key used for the Gantt intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GanttColorMode {
    #[default]
    Progress,
    Scale,
}

impl GanttColorMode {
    pub fn label(&self) -> &'static str {
        match self {
            GanttColorMode::Progress => "Color by progress",
            GanttColorMode::Scale => "Color by resource requirement",
        }
    }
}

/// Creates the interactive dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Shared category axis across all series of one chart.
    pub fn categories(series: &[BarSeries]) -> Vec<String> {
        let labels: BTreeSet<String> = series
            .iter()
            .flat_map(|s| s.bars.iter().map(|(label, _)| label.clone()))
            .collect();
        labels.into_iter().collect()
    }

    /// Draw one bar chart card body: one series per resource scale,
    /// stacked or grouped.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, series: &[BarSeries], mode: BarMode) {
        let categories = Self::categories(series);
        if categories.is_empty() {
            ui.label("No matching projects");
            return;
        }

        let x_labels = categories.clone();
        let n_series = series.len().max(1);
        let group_width = 0.8 / n_series as f64;

        let mut charts: Vec<BarChart> = Vec::new();
        for (si, s) in series.iter().enumerate() {
            let color = scale_color(s.scale);
            let bars: Vec<Bar> = s
                .bars
                .iter()
                .filter_map(|(label, count)| {
                    let idx = categories.iter().position(|c| c == label)?;
                    let x = match mode {
                        BarMode::Stack => idx as f64,
                        BarMode::Group => {
                            idx as f64 - 0.4 + group_width * (si as f64 + 0.5)
                        }
                    };
                    let width = match mode {
                        BarMode::Stack => 0.6,
                        BarMode::Group => group_width * 0.9,
                    };
                    Some(
                        Bar::new(x, *count as f64)
                            .width(width)
                            .fill(color)
                            .name(format!("{label} ({})", s.scale.label())),
                    )
                })
                .collect();

            let mut chart = BarChart::new(bars).color(color).name(s.scale.label());
            if mode == BarMode::Stack {
                let below: Vec<&BarChart> = charts.iter().collect();
                chart = chart.stack_on(&below);
            }
            charts.push(chart);
        }

        Plot::new(format!("bar_{id}"))
            .height(260.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label("# of projects")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 0.25 || idx < 0.0 {
                    return String::new();
                }
                x_labels
                    .get(idx as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Draw the Gantt chart: one horizontal interval per task, colored by
    /// progress or by scale, with a marker line at today's date.
    pub fn draw_gantt_chart(
        ui: &mut egui::Ui,
        id: &str,
        tasks: &[GanttTask],
        color_mode: GanttColorMode,
        today: NaiveDate,
    ) {
        if tasks.is_empty() {
            ui.label("No matching projects with valid semester codes");
            return;
        }

        let n = tasks.len();
        let task_labels: Vec<String> = tasks.iter().map(|t| t.task.clone()).collect();

        // One chart per color class so the legend shows the key.
        let classes: Vec<(String, Color32)> = match color_mode {
            GanttColorMode::Progress => Progress::ALL
                .iter()
                .map(|p| (p.label().to_string(), progress_color(*p)))
                .collect(),
            GanttColorMode::Scale => Scale::ALL
                .iter()
                .map(|s| (s.label().to_string(), scale_color(*s)))
                .collect(),
        };

        let mut charts: Vec<BarChart> = Vec::new();
        for (class, color) in &classes {
            let bars: Vec<Bar> = tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| {
                    let key = match color_mode {
                        GanttColorMode::Progress => t.progress.label(),
                        GanttColorMode::Scale => t.scale.label(),
                    };
                    key == class.as_str()
                })
                .map(|(i, t)| {
                    // Rows listed top-down in input order.
                    let y = (n - 1 - i) as f64;
                    let start = t.start.num_days_from_ce() as f64;
                    let days = (t.finish - t.start).num_days() as f64 + 1.0;
                    Bar::new(y, days)
                        .base_offset(start)
                        .width(0.6)
                        .fill(*color)
                        .name(&t.task)
                })
                .collect();
            if bars.is_empty() {
                continue;
            }
            charts.push(BarChart::new(bars).horizontal().color(*color).name(class));
        }

        let height = (n as f32 * 22.0 + 60.0).max(220.0);
        let y_labels = task_labels.clone();

        Plot::new(format!("gantt_{id}"))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                NaiveDate::from_num_days_from_ce_opt(mark.value as i32)
                    .map(|d| format!("{}-{:02}", d.year(), d.month()))
                    .unwrap_or_default()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 0.25 || idx < 0.0 {
                    return String::new();
                }
                let i = idx as usize;
                if i < y_labels.len() {
                    y_labels[y_labels.len() - 1 - i].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
                plot_ui.vline(
                    VLine::new(today.num_days_from_ce() as f64)
                        .color(Color32::GRAY)
                        .name("Today"),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_union_is_sorted() {
        let series = vec![
            BarSeries {
                scale: Scale::Low,
                bars: vec![("B".to_string(), 1), ("C".to_string(), 2)],
            },
            BarSeries {
                scale: Scale::High,
                bars: vec![("A".to_string(), 1), ("B".to_string(), 3)],
            },
        ];
        assert_eq!(ChartPlotter::categories(&series), vec!["A", "B", "C"]);
    }
}
