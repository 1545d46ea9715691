use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::FilterSelection;
use crate::data::model::{Dimension, SurveyTable};
use crate::data::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table, shared read-only for the life of the process.
    pub table: Option<Arc<SurveyTable>>,

    /// Current filter selection.
    pub selection: FilterSelection,

    /// Index of the active indicator column.
    pub indicator: usize,

    /// Derived views for the current selection and indicator.
    pub view: DashboardView,

    /// Colours per region (trend lines).
    pub region_colors: ColorMap,

    /// Colours per survey round (comparison bars).
    pub survey_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table, apply the opening selection and compute
    /// the first view.
    pub fn set_table(
        &mut self,
        table: SurveyTable,
        region: &str,
        area: &str,
        indicator: Option<&str>,
    ) {
        self.selection = FilterSelection::initial(&table, region, area);
        self.indicator = match indicator {
            Some(name) => table.indicator_index(name).unwrap_or_else(|| {
                log::warn!("Indicator '{name}' not found, showing the first indicator");
                0
            }),
            None => 0,
        };
        self.region_colors = ColorMap::new(table.unique_values(Dimension::Region));
        self.survey_colors = ColorMap::new(table.unique_values(Dimension::Survey));
        self.table = Some(Arc::new(table));
        self.status_message = None;
        self.recompute();
    }

    /// Load a file and make it the current table.  On failure the previous
    /// table stays and the error is shown in the status bar.
    pub fn load(&mut self, path: &Path, region: &str, area: &str, indicator: Option<&str>) {
        match crate::data::loader::load_file(path) {
            Ok(table) => self.set_table(table, region, area, indicator),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Rebuild the derived views from scratch.
    pub fn recompute(&mut self) {
        self.view = match &self.table {
            Some(table) => DashboardView::compute(table, &self.selection, self.indicator),
            None => DashboardView::default(),
        };
    }

    /// Name of the active indicator column.
    pub fn indicator_name(&self) -> Option<&str> {
        self.table
            .as_ref()?
            .indicator_names
            .get(self.indicator)
            .map(String::as_str)
    }

    pub fn set_indicator(&mut self, indicator: usize) {
        if self.indicator != indicator {
            self.indicator = indicator;
            self.recompute();
        }
    }

    /// Toggle a single value in one dimension's selection.
    pub fn toggle_value(&mut self, dimension: Dimension, value: &str) {
        let selected = self.selection.get_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.recompute();
    }

    /// Select every value of a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(table) = &self.table {
            *self.selection.get_mut(dimension) =
                table.unique_values(dimension).iter().cloned().collect();
            self.recompute();
        }
    }

    /// Deselect every value of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.get_mut(dimension).clear();
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_table;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_table(sample_table(), "India", "Total", None);
        state
    }

    #[test]
    fn test_set_table_computes_initial_view() {
        let state = loaded();
        assert_eq!(state.view.filtered, vec![0, 1]);
        assert_eq!(state.view.kpi, Some(10.0));
        assert_eq!(state.indicator_name(), Some("ind"));
    }

    #[test]
    fn test_toggle_recomputes() {
        let mut state = loaded();
        state.toggle_value(Dimension::Region, "Kerala");
        assert_eq!(state.view.filtered, vec![0, 1, 2]);
        assert_eq!(state.view.kpi, Some(15.0));

        state.toggle_value(Dimension::Region, "India");
        assert_eq!(state.view.filtered, vec![2]);
        assert_eq!(state.view.kpi, Some(20.0));
    }

    #[test]
    fn test_select_none_and_all() {
        let mut state = loaded();
        state.select_none(Dimension::Survey);
        assert!(state.view.filtered.is_empty());
        assert_eq!(state.view.kpi, None);
        assert!(state.view.comparison.is_empty());

        state.select_all(Dimension::Survey);
        assert_eq!(state.view.filtered, vec![0, 1]);
    }

    #[test]
    fn test_unknown_indicator_falls_back_to_first() {
        let mut state = AppState::default();
        state.set_table(sample_table(), "India", "Total", Some("nope"));
        assert_eq!(state.indicator, 0);
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut state = loaded();
        state.load(Path::new("missing.json"), "India", "Total", None);
        assert!(state.table.is_some());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("Unsupported file extension")));
    }

    #[test]
    fn test_no_table_gives_empty_view() {
        let mut state = AppState::default();
        state.recompute();
        assert!(state.view.filtered.is_empty());
        assert_eq!(state.view.kpi, None);
    }
}
