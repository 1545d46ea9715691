use std::collections::BTreeMap;

use super::aggregate::{
    BarGroup, SeriesPoint, comparison_groups, comparison_rows_for, compute_mean, trend_rows,
    trend_series,
};
use super::filter::{FilterSelection, filter_rows};
use super::model::SurveyTable;

/// Which dashboard panel came up empty.  Each panel carries its own notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyNotice {
    Kpi,
    Trend,
    Comparison,
}

impl EmptyNotice {
    pub fn message(self) -> &'static str {
        match self {
            EmptyNotice::Kpi => "No data available for selected filters",
            EmptyNotice::Trend => "No data available",
            EmptyNotice::Comparison => "No comparison data available",
        }
    }
}

/// Everything the dashboard draws for one (table, selection, indicator).
///
/// Recomputed from scratch on every interaction; nothing carries over
/// between cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub indicator: usize,
    /// Filtered rows for the raw table, missing indicator values included.
    pub filtered: Vec<usize>,
    /// KPI: rounded mean over `filtered`, `None` when nothing to average.
    pub kpi: Option<f64>,
    /// Filtered rows carrying the indicator.
    pub trend: Vec<usize>,
    /// Region → points ordered by survey round.
    pub trend_series: BTreeMap<String, Vec<SeriesPoint>>,
    /// Cross-region rows, independent of the region selection.
    pub comparison: Vec<usize>,
    /// Bar groups per survey round, in round order.
    pub comparison_groups: Vec<BarGroup>,
}

impl DashboardView {
    pub fn compute(table: &SurveyTable, selection: &FilterSelection, indicator: usize) -> Self {
        let filtered = filter_rows(table, selection);
        let kpi = compute_mean(table, &filtered, indicator);
        let trend = trend_rows(table, &filtered, indicator);
        let trend_series = trend_series(table, &trend, indicator);
        let comparison = comparison_rows_for(table, selection, indicator);
        let comparison_groups = comparison_groups(table, &comparison, indicator);

        log::debug!(
            "Recomputed view: {} filtered, {} trend, {} comparison rows",
            filtered.len(),
            trend.len(),
            comparison.len()
        );

        DashboardView {
            indicator,
            filtered,
            kpi,
            trend,
            trend_series,
            comparison,
            comparison_groups,
        }
    }

    /// Notices for every panel that has nothing to show.
    pub fn notices(&self) -> Vec<EmptyNotice> {
        let mut notices = Vec::new();
        if self.kpi.is_none() {
            notices.push(EmptyNotice::Kpi);
        }
        if self.trend.is_empty() {
            notices.push(EmptyNotice::Trend);
        }
        if self.comparison.is_empty() {
            notices.push(EmptyNotice::Comparison);
        }
        notices
    }

    /// Plain-text rendering of the derived views, used by `--summary`.
    pub fn summary(&self, table: &SurveyTable) -> String {
        let name = table
            .indicator_names
            .get(self.indicator)
            .map(String::as_str)
            .unwrap_or("?");
        let mut out = format!("Indicator: {name}\n");

        if let Some(v) = self.kpi {
            out.push_str(&format!("Key value: {v:.2}\n"));
        }
        out.push_str(&format!("Filtered rows: {}\n", self.filtered.len()));

        for (region, points) in &self.trend_series {
            let pts: Vec<String> = points
                .iter()
                .map(|(survey, v)| format!("{survey}={v}"))
                .collect();
            out.push_str(&format!("Trend {region}: {}\n", pts.join(", ")));
        }
        if !self.comparison.is_empty() {
            out.push_str(&format!("Comparison rows: {}\n", self.comparison.len()));
        }

        for notice in self.notices() {
            out.push_str(&format!("Notice: {}\n", notice.message()));
        }
        out
    }
}
