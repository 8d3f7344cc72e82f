//! Stratboard - Library Strategy Planning Dashboard
//!
//! Loads the strategy projects table once at startup and renders
//! interactive portfolio charts with shared filter controls.

mod analysis;
mod charts;
mod data;
mod gui;

use data::{Source, TableLoader};
use eframe::egui;
use gui::StratboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // A configured source that fails to load is fatal: no panel can be
    // served without the base table. With no source at all the app starts
    // empty and the user can browse for a file.
    let initial = match Source::resolve() {
        Some(source) => match TableLoader::load(&source) {
            Ok(table) => {
                log::info!(
                    "loaded {} projects from {}",
                    table.len(),
                    source.display_name()
                );
                Some((source, table))
            }
            Err(err) => {
                log::error!("failed to load {}: {err}", source.display_name());
                std::process::exit(1);
            }
        },
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Stratboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Stratboard",
        options,
        Box::new(|cc| Ok(Box::new(StratboardApp::new(cc, initial)))),
    )
}
