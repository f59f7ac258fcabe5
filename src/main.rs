mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use app::WdiExplorerApp;
use clap::Parser;
use eframe::egui;

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(path) = cli.data {
        config.data_path = path;
    }

    // The table is loaded once; nothing below reloads it.
    let dataset = match data::loader::load_file(&config.data_path) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Cannot start without the indicator table: {e:#}");
            return Err(e);
        }
    };
    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "WDI Explorer – World Development Indicators",
        options,
        Box::new(move |_cc| Ok(Box::new(WdiExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}
