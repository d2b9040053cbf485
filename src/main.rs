mod app;
mod cli;
mod data;
mod engine;
mod export;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::MovieExplorerApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Args::parse();
    let filters = args.filter_state()?;

    // A dataset that cannot be loaded at startup is fatal.
    let dataset = data::loader::load_file(&args.data)
        .with_context(|| format!("Failed to load {}", args.data.display()))?;

    if args.headless {
        export::write_selection(dataset, filters, std::io::stdout().lock())?;
        return Ok(());
    }

    let state = AppState::new(dataset, filters, args.data.clone());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(MovieExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
