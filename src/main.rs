mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::CampusApp;
use eframe::egui;
use state::AppState;

/// Default dataset path, relative to the working directory. An optional CLI
/// argument overrides it.
const DATA_FILE: &str = "university_student_data.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DATA_FILE.to_string());
    let dataset = data::loader::load_csv(Path::new(&path))
        .with_context(|| format!("loading dataset from '{path}'"))?;
    if dataset.is_empty() {
        log::warn!("Dataset at '{path}' contains no records");
    }
    log::info!(
        "Loaded {} records covering years {:?}",
        dataset.len(),
        dataset.year_span()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset);
    eframe::run_native(
        "Campus Insights – Enrollment Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(CampusApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
