mod app;
mod color;
mod data;
mod error;
mod settings;
mod state;
mod ui;

use std::process::ExitCode;

use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use settings::Settings;
use state::AppState;

fn main() -> ExitCode {
    let settings = Settings::parse();
    settings.init_logging();

    if settings.summary {
        return print_summary(&settings);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "NFHS Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(settings)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Headless mode: load, compute the startup view, print it.
fn print_summary(settings: &Settings) -> ExitCode {
    let mut state = AppState::default();
    state.load(
        &settings.data,
        &settings.region,
        &settings.area,
        settings.indicator.as_deref(),
    );

    match &state.table {
        Some(table) => {
            print!("{}", state.view.summary(table));
            ExitCode::SUCCESS
        }
        None => {
            if let Some(msg) = &state.status_message {
                eprintln!("{msg}");
            }
            ExitCode::FAILURE
        }
    }
}
