use eframe::egui::{self, ScrollArea, Ui};

use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::{kpi, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    settings: Settings,
}

impl DashboardApp {
    /// Load the configured table once; the window still opens if it fails.
    pub fn new(settings: Settings) -> Self {
        let mut state = AppState::default();
        state.load(
            &settings.data,
            &settings.region,
            &settings.area,
            settings.indicator.as_deref(),
        );
        Self { state, settings }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if let Some(path) = panels::top_bar(ui, &mut self.state) {
                self.state.load(
                    &path,
                    &self.settings.region,
                    &self.settings.area,
                    self.settings.indicator.as_deref(),
                );
            }
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &mut self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey table to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("National Family Health Survey (NFHS) Dashboard");
            panels::indicator_selector(ui, state);
            ui.separator();

            ui.columns(2, |cols| {
                kpi::kpi_panel(&mut cols[0], state);
                plot::trend_chart(&mut cols[1], state, &loaded);
            });
            ui.separator();

            plot::comparison_chart(ui, state, &loaded);
            ui.separator();

            table::filtered_table(ui, state, &loaded);
        });
}
