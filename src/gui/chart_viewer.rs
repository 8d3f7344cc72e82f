//! Chart Viewer Widget
//! Scrollable panel hosting the eight dashboard cards.

use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};

use crate::analysis::{BarSeries, CoOccurrence, GanttTask};
use crate::charts::{ChartPlotter, NetworkChart};
use crate::gui::control_panel::ViewSettings;

const CARD_SPACING: f32 = 15.0;

/// Identity of one dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    StatusBar,
    ThemesBar,
    ThemeGraph,
    GroupingsBar,
    TeamsBar,
    ExternalBar,
    TeamsGraph,
    Gantt,
}

impl PanelId {
    /// Card order, top to bottom.
    pub const ALL: [PanelId; 8] = [
        PanelId::StatusBar,
        PanelId::ThemesBar,
        PanelId::ThemeGraph,
        PanelId::GroupingsBar,
        PanelId::TeamsBar,
        PanelId::ExternalBar,
        PanelId::TeamsGraph,
        PanelId::Gantt,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::StatusBar => "Project Statuses",
            PanelId::ThemesBar => "Projects by Themes",
            PanelId::ThemeGraph => "Intra-project theme relationships",
            PanelId::GroupingsBar => "Project Groupings",
            PanelId::TeamsBar => "Projects by Library Teams",
            PanelId::ExternalBar => "Projects by external entities involved",
            PanelId::TeamsGraph => "Intra-project team relationships",
            PanelId::Gantt => "Project Gantt Chart",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            PanelId::StatusBar => "project_statuses",
            PanelId::ThemesBar => "projects_by_themes",
            PanelId::ThemeGraph => "theme_relationships",
            PanelId::GroupingsBar => "project_groupings",
            PanelId::TeamsBar => "projects_by_teams",
            PanelId::ExternalBar => "projects_by_external_parties",
            PanelId::TeamsGraph => "team_relationships",
            PanelId::Gantt => "project_gantt",
        }
    }
}

/// Computed content of one card.
#[derive(Debug, Clone)]
pub enum PanelData {
    Bars(Vec<BarSeries>),
    Network(CoOccurrence),
    Gantt(Vec<GanttTask>),
}

/// One full recomputation result.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub panels: Vec<(PanelId, PanelData)>,
    pub today: NaiveDate,
}

/// Scrollable card list for the dashboard panels.
#[derive(Default)]
pub struct DashboardViewer {
    pub data: Option<DashboardData>,
}

impl DashboardViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    /// Draw all cards.
    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewSettings) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (panel, content) in &data.panels {
                    Self::draw_card(ui, *panel, content, view, data.today);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_card(
        ui: &mut egui::Ui,
        panel: PanelId,
        content: &PanelData,
        view: &ViewSettings,
        today: NaiveDate,
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 10.0);

                let title = match (panel, content) {
                    (PanelId::ThemesBar, _) => {
                        format!("Projects by {}", view.theme_column.label())
                    }
                    _ => panel.title().to_string(),
                };
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);

                match content {
                    PanelData::Bars(series) => {
                        ChartPlotter::draw_bar_chart(
                            ui,
                            panel.file_stem(),
                            series,
                            view.bar_mode,
                        );
                    }
                    PanelData::Network(graph) => {
                        NetworkChart::draw(ui, graph, view.graph_layout, 600.0);
                    }
                    PanelData::Gantt(tasks) => {
                        ChartPlotter::draw_gantt_chart(
                            ui,
                            panel.file_stem(),
                            tasks,
                            view.gantt_color,
                            today,
                        );
                    }
                }
            });
    }
}
