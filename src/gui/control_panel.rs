//! Control Panel Widget
//! Left side panel with the shared filter controls and actions.

use egui::{Color32, ComboBox, RichText, ScrollArea};

use crate::charts::{BarMode, GanttColorMode, NetworkLayout};
use crate::data::{ColumnSel, Filters, ProjectTable, Scale, Status};

/// Which theme column feeds the themes bar panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeColumn {
    #[default]
    Primary,
    Secondary,
    All,
}

impl ThemeColumn {
    pub const ALL: [ThemeColumn; 3] = [ThemeColumn::Primary, ThemeColumn::Secondary, ThemeColumn::All];

    pub fn label(&self) -> &'static str {
        match self {
            ThemeColumn::Primary => "Primary Themes",
            ThemeColumn::Secondary => "Secondary Themes",
            ThemeColumn::All => "Primary and Secondary Themes",
        }
    }

    /// Column selector plus multi-value split flag.
    pub fn column(&self) -> (ColumnSel, bool) {
        match self {
            ThemeColumn::Primary => (ColumnSel::PrimaryTheme, false),
            ThemeColumn::Secondary => (ColumnSel::SecondaryThemes, true),
            ThemeColumn::All => (ColumnSel::AllThemes, true),
        }
    }
}

/// Presentation choices that do not subset rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSettings {
    pub bar_mode: BarMode,
    pub theme_column: ThemeColumn,
    pub graph_layout: NetworkLayout,
    pub gantt_color: GanttColorMode,
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FiltersChanged,
    ExportCharts,
}

/// Left side control panel with filter selections and settings.
pub struct ControlPanel {
    pub view: ViewSettings,
    status_selected: Vec<bool>,
    scale_selected: Vec<bool>,
    team_selected: Vec<bool>,
    primary_theme: Option<String>,

    // Domains observed in the loaded table.
    team_options: Vec<String>,
    theme_options: Vec<String>,

    pub source_name: String,
    pub status_line: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        // Startable work is visible by default, everything else opt-in.
        let default_statuses = [Status::Committed, Status::InProgress, Status::Completed];
        let status_selected = Status::ALL
            .iter()
            .map(|s| default_statuses.contains(s))
            .collect();

        Self {
            view: ViewSettings::default(),
            status_selected,
            scale_selected: vec![false; Scale::ALL.len()],
            team_selected: Vec::new(),
            primary_theme: None,
            team_options: Vec::new(),
            theme_options: Vec::new(),
            source_name: String::new(),
            status_line: "No data loaded".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the data-driven dropdown domains after a (re)load.
    pub fn update_domains(&mut self, table: &ProjectTable, source_name: &str) {
        self.team_options = table.team_options.clone();
        self.team_selected = vec![false; self.team_options.len()];
        self.theme_options = table.primary_themes.clone();
        if let Some(theme) = &self.primary_theme {
            if !self.theme_options.contains(theme) {
                self.primary_theme = None;
            }
        }
        self.source_name = source_name.to_string();
        self.status_line = format!("Loaded {} projects", table.len());
    }

    /// Current filter selections.
    pub fn filters(&self) -> Filters {
        Filters {
            statuses: Status::ALL
                .iter()
                .zip(&self.status_selected)
                .filter(|(_, &sel)| sel)
                .map(|(s, _)| *s)
                .collect(),
            scales: Scale::ALL
                .iter()
                .zip(&self.scale_selected)
                .filter(|(_, &sel)| sel)
                .map(|(s, _)| *s)
                .collect(),
            teams: self
                .team_options
                .iter()
                .zip(&self.team_selected)
                .filter(|(_, &sel)| sel)
                .map(|(t, _)| t.clone())
                .collect(),
            primary_theme: self.primary_theme.clone(),
        }
    }

    pub fn set_status_line(&mut self, text: &str) {
        self.status_line = text.to_string();
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let mut changed = false;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Strategy Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Library project portfolio")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let name = if self.source_name.is_empty() {
                        "No file selected".to_string()
                    } else {
                        self.source_name.clone()
                    };
                    ui.label(RichText::new(name).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        // ===== Filters Section =====
        ui.label(RichText::new("Filters").size(14.0).strong());
        ui.label(
            RichText::new("Empty selections show everything")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        ui.label("Status:");
        for (i, status) in Status::ALL.iter().enumerate() {
            if ui
                .checkbox(&mut self.status_selected[i], status.label())
                .changed()
            {
                changed = true;
            }
        }

        ui.add_space(8.0);
        ui.label("Resource requirement:");
        for (i, scale) in Scale::ALL.iter().enumerate() {
            if ui
                .checkbox(&mut self.scale_selected[i], scale.label())
                .changed()
            {
                changed = true;
            }
        }

        ui.add_space(8.0);
        ui.label("Teams:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("teams_filter")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for (i, team) in self.team_options.iter().enumerate() {
                            if ui.checkbox(&mut self.team_selected[i], team).changed() {
                                changed = true;
                            }
                        }
                    });
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Primary theme:");
            let selected = self
                .primary_theme
                .clone()
                .unwrap_or_else(|| "All".to_string());
            ComboBox::from_id_salt("primary_theme")
                .width(140.0)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.primary_theme.is_none(), "All")
                        .clicked()
                    {
                        self.primary_theme = None;
                        changed = true;
                    }
                    for theme in &self.theme_options {
                        let is_selected = self.primary_theme.as_deref() == Some(theme.as_str());
                        if ui.selectable_label(is_selected, theme).clicked() {
                            self.primary_theme = Some(theme.clone());
                            changed = true;
                        }
                    }
                });
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        // ===== Display Section =====
        ui.label(RichText::new("Display").size(14.0).strong());
        ui.add_space(5.0);

        for mode in [BarMode::Stack, BarMode::Group] {
            if ui
                .radio_value(&mut self.view.bar_mode, mode, mode.label())
                .changed()
            {
                changed = true;
            }
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label("Themes bar:");
            ComboBox::from_id_salt("theme_column")
                .width(180.0)
                .selected_text(self.view.theme_column.label())
                .show_ui(ui, |ui| {
                    for option in ThemeColumn::ALL {
                        if ui
                            .selectable_value(&mut self.view.theme_column, option, option.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label("Graph layout:");
            ComboBox::from_id_salt("graph_layout")
                .width(140.0)
                .selected_text(self.view.graph_layout.label())
                .show_ui(ui, |ui| {
                    for option in NetworkLayout::ALL {
                        ui.selectable_value(&mut self.view.graph_layout, option, option.label());
                    }
                });
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label("Gantt colors:");
            ComboBox::from_id_salt("gantt_color")
                .width(200.0)
                .selected_text(self.view.gantt_color.label())
                .show_ui(ui, |ui| {
                    for option in [GanttColorMode::Progress, GanttColorMode::Scale] {
                        if ui
                            .selectable_value(&mut self.view.gantt_color, option, option.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        // ===== Actions =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("Export charts").size(14.0))
                .min_size(egui::vec2(160.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportCharts;
            }
        });

        ui.add_space(10.0);
        let status_color = if self.status_line.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(
            RichText::new(&self.status_line)
                .size(11.0)
                .color(status_color),
        );

        if changed && action == ControlPanelAction::None {
            action = ControlPanelAction::FiltersChanged;
        }
        action
    }
}
