use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No data loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dimension in Dimension::ALL {
                let all_values = table.unique_values(dimension);
                let n_selected = state.selection.get(dimension).len();
                let header_text = format!(
                    "Select {}  ({n_selected}/{})",
                    dimension.label(),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dimension)
                    .default_open(dimension != Dimension::Region)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dimension);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dimension);
                            }
                        });

                        for value in all_values {
                            let mut checked = state.selection.get(dimension).contains(value);
                            let mut text = RichText::new(value);
                            if dimension == Dimension::Region {
                                text = text.color(state.region_colors.color_for(value));
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_value(dimension, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Indicator selector
// ---------------------------------------------------------------------------

/// Dropdown over the indicator columns.
pub fn indicator_selector(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        return;
    };
    let current = state.indicator_name().unwrap_or_default().to_string();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Select Health Indicator");
        egui::ComboBox::from_id_salt("indicator")
            .selected_text(current)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for (i, name) in table.indicator_names.iter().enumerate() {
                    if ui.selectable_label(state.indicator == i, name.as_str()).clicked() {
                        state.set_indicator(i);
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.  Returns a file picked via File → Open…
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> Option<std::path::PathBuf> {
    let mut opened = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                opened = open_file_dialog();
                ui.close_menu();
            }
            let can_export = state.table.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.len(),
                state.view.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    opened
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open survey table")
        .add_filter("Supported files", &["csv", "tsv", "tab"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file()
}

fn export_file_dialog(state: &mut AppState) {
    let Some(table) = &state.table else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .set_file_name("filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    if let Err(e) = crate::data::export::save_rows(table, &state.view.filtered, &path) {
        log::error!("Failed to export: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
