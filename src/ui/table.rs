use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SurveyRow, SurveyTable};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 360.0;

/// Display text of one cell; missing indicator values are blank.
pub fn cell_text(row: &SurveyRow, column: usize) -> String {
    match column {
        0 => row.region.clone(),
        1 => row.survey.clone(),
        2 => row.area.clone(),
        c => row
            .indicator(c - 3)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

/// Raw data table of the filtered rows, all columns.
pub fn filtered_table(ui: &mut Ui, state: &AppState, table: &SurveyTable) {
    ui.heading("Filtered Data Table");

    let rows = &state.view.filtered;
    let n_cols = 3 + table.indicator_names.len();

    TableBuilder::new(ui)
        .id_salt("filtered_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .columns(Column::auto().at_least(60.0), n_cols)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in table.column_names() {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row_ui| {
                let Some(row) = table.rows.get(rows[row_ui.index()]) else {
                    return;
                };
                for c in 0..n_cols {
                    row_ui.col(|ui| {
                        ui.label(cell_text(row, c));
                    });
                }
            });
        });
}
