//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::StratboardApp;
pub use chart_viewer::{DashboardData, DashboardViewer, PanelData, PanelId};
pub use control_panel::{ControlPanel, ControlPanelAction, ThemeColumn, ViewSettings};
