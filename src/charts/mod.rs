//! Charts module - interactive panels and static export

mod exporter;
mod network;
mod plotter;

pub use exporter::ChartExporter;
pub use network::{NetworkChart, NetworkLayout};
pub use plotter::{progress_color, scale_color, BarMode, ChartPlotter, GanttColorMode};
