//! Dashboard Application
//! Main window wiring the filter controls to background recomputation.

use egui::SidePanel;
use rayon::prelude::*;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

use crate::analysis::{bar_series, build_graph, build_timeline};
use crate::charts::ChartExporter;
use crate::data::{ColumnSel, Filters, ProjectTable, Source, TableLoader};
use crate::gui::chart_viewer::{DashboardData, DashboardViewer, PanelData, PanelId};
use crate::gui::control_panel::{ControlPanel, ControlPanelAction, ViewSettings};

/// Recomputation result from the background thread
enum CalcResult {
    Complete(DashboardData),
}

/// CSV loading result from the background thread
enum LoadResult {
    Complete {
        table: ProjectTable,
        source_name: String,
    },
    Error(String),
}

/// Main application window.
pub struct StratboardApp {
    table: Arc<ProjectTable>,
    control_panel: ControlPanel,
    viewer: DashboardViewer,

    // Async recomputation
    calc_rx: Option<Receiver<CalcResult>>,
    is_computing: bool,
    recompute_queued: bool,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl StratboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        initial: Option<(Source, ProjectTable)>,
    ) -> Self {
        let mut app = Self {
            table: Arc::new(ProjectTable::default()),
            control_panel: ControlPanel::new(),
            viewer: DashboardViewer::new(),
            calc_rx: None,
            is_computing: false,
            recompute_queued: false,
            load_rx: None,
            is_loading: false,
        };

        if let Some((source, table)) = initial {
            app.control_panel
                .update_domains(&table, &source.display_name());
            app.table = Arc::new(table);
            app.start_recompute();
        }

        app
    }

    /// Compute every panel from the immutable table.
    fn compute_dashboard(
        table: &ProjectTable,
        filters: &Filters,
        view: &ViewSettings,
    ) -> DashboardData {
        let today = chrono::Local::now().date_naive();
        let scales = filters.resolved_scales();
        let rows = &table.projects;

        let panels: Vec<(PanelId, PanelData)> = PanelId::ALL
            .par_iter()
            .map(|panel| {
                let data = match panel {
                    // The status chart counts every status, so the status
                    // selection is not applied to it.
                    PanelId::StatusBar => {
                        let subset = filters.apply(rows, false, true);
                        PanelData::Bars(bar_series(&subset, ColumnSel::Status, &scales, false))
                    }
                    PanelId::ThemesBar => {
                        let subset = filters.apply(rows, true, true);
                        let (column, split) = view.theme_column.column();
                        PanelData::Bars(bar_series(&subset, column, &scales, split))
                    }
                    PanelId::ThemeGraph => {
                        let subset = filters.apply(rows, true, false);
                        PanelData::Network(build_graph(&subset, ColumnSel::AllThemes))
                    }
                    PanelId::GroupingsBar => {
                        let subset = filters.apply(rows, true, true);
                        PanelData::Bars(bar_series(&subset, ColumnSel::Grouping, &scales, false))
                    }
                    // Team-centric panels ignore the teams selection.
                    PanelId::TeamsBar => {
                        let subset = filters.apply(rows, true, false);
                        PanelData::Bars(bar_series(&subset, ColumnSel::Teams, &scales, true))
                    }
                    PanelId::ExternalBar => {
                        let subset = filters.apply(rows, true, false);
                        PanelData::Bars(bar_series(&subset, ColumnSel::External, &scales, true))
                    }
                    PanelId::TeamsGraph => {
                        let subset = filters.apply(rows, true, false);
                        PanelData::Network(build_graph(&subset, ColumnSel::Teams))
                    }
                    PanelId::Gantt => {
                        let subset = filters.apply(rows, true, true);
                        PanelData::Gantt(build_timeline(&subset, today))
                    }
                };
                (*panel, data)
            })
            .collect();

        DashboardData { panels, today }
    }

    /// Start recomputation in a background thread.
    fn start_recompute(&mut self) {
        if self.table.is_empty() {
            return;
        }
        if self.is_computing {
            self.recompute_queued = true;
            return;
        }

        let table = Arc::clone(&self.table);
        let filters = self.control_panel.filters();
        let view = self.control_panel.view.clone();

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_computing = true;
        self.control_panel.set_status_line("Recomputing...");

        thread::spawn(move || {
            let data = Self::compute_dashboard(&table, &filters, &view);
            let _ = tx.send(CalcResult::Complete(data));
        });
    }

    /// Check for recomputation results
    fn check_calc_results(&mut self) {
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Complete(data) => {
                        self.viewer.set_data(data);
                        self.control_panel.set_status_line(&format!(
                            "Loaded {} projects",
                            self.table.len()
                        ));
                        self.is_computing = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.calc_rx = Some(rx);
            }
        }

        if !self.is_computing && self.recompute_queued {
            self.recompute_queued = false;
            self.start_recompute();
        }
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.viewer.clear();
            self.control_panel.set_status_line("Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);
            let source = Source::Path(path);

            thread::spawn(move || {
                let result = TableLoader::load(&source);
                let _ = match result {
                    Ok(table) => tx.send(LoadResult::Complete {
                        table,
                        source_name: source.display_name(),
                    }),
                    Err(e) => tx.send(LoadResult::Error(e.to_string())),
                };
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { table, source_name } => {
                        self.control_panel.update_domains(&table, &source_name);
                        self.table = Arc::new(table);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.start_recompute();
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_status_line(&format!("Error: {error}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Export the current panels as PNG files into a chosen directory.
    fn handle_export(&mut self) {
        let Some(data) = &self.viewer.data else {
            self.control_panel.set_status_line("No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let view = &self.control_panel.view;
        let mut exported = 0usize;

        for (panel, content) in &data.panels {
            let path = dir.join(format!("{}.png", panel.file_stem()));
            let title = match panel {
                PanelId::ThemesBar => format!("Projects by {}", view.theme_column.label()),
                _ => panel.title().to_string(),
            };

            let result = match content {
                PanelData::Bars(series) => {
                    ChartExporter::export_bars(&path, &title, series, view.bar_mode)
                }
                PanelData::Network(graph) => {
                    let elements_path = dir.join(format!("{}.json", panel.file_stem()));
                    if let Err(e) = ChartExporter::export_network_elements(&elements_path, graph) {
                        log::warn!("element export failed for {}: {e}", panel.file_stem());
                    }
                    ChartExporter::export_network(&path, &title, graph, view.graph_layout)
                }
                PanelData::Gantt(tasks) => {
                    ChartExporter::export_gantt(&path, &title, tasks, view.gantt_color)
                }
            };

            match result {
                Ok(()) => exported += 1,
                Err(e) => log::warn!("export failed for {}: {e}", panel.file_stem()),
            }
        }

        self.control_panel
            .set_status_line(&format!("Exported {exported} charts"));
        if exported > 0 {
            let _ = open::that(&dir);
        }
    }
}

impl eframe::App for StratboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.check_calc_results();

        if self.is_loading || self.is_computing {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FiltersChanged => self.start_recompute(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.control_panel.view.clone();
            self.viewer.show(ui, &view);
        });
    }
}
