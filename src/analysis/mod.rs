//! Analysis module - pure builders feeding the dashboard panels

mod aggregate;
mod cooccur;
mod timeline;

pub use aggregate::{bar_series, value_counts, BarSeries};
pub use cooccur::{build_graph, CoOccurrence, Edge};
pub use timeline::{
    build_timeline, progress, semester_range, task_label, valid_semester, GanttTask, Progress,
    TIMELINE_STATUSES,
};
