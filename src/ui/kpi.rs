use eframe::egui::{RichText, Ui};

use crate::data::pipeline::EmptyNotice;
use crate::state::AppState;

/// Text shown as the metric, two decimals like the source figures.
pub fn format_kpi(value: f64) -> String {
    format!("{value:.2}")
}

/// KPI panel: mean of the active indicator over the filtered rows.
pub fn kpi_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Key Value");

    match state.view.kpi {
        Some(value) => {
            ui.label(state.indicator_name().unwrap_or_default());
            ui.label(RichText::new(format_kpi(value)).size(36.0).strong());
            ui.small(format!(
                "mean of {} rows with a value",
                state.view.trend.len()
            ));
        }
        None => {
            ui.label(
                RichText::new(EmptyNotice::Kpi.message()).color(ui.visuals().warn_fg_color),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kpi_keeps_two_decimals() {
        assert_eq!(format_kpi(10.0), "10.00");
        assert_eq!(format_kpi(1.67), "1.67");
    }
}
