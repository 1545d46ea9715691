use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::{BarGroup, SeriesPoint};
use crate::data::model::{Dimension, SurveyTable, natural_cmp};
use crate::data::pipeline::EmptyNotice;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

/// Above this many categories, axis labels are shortened to fit.
const DENSE_AXIS_LABELS: usize = 12;
/// Characters kept when shortening an axis label.
const SHORT_LABEL_CHARS: usize = 7;

// ---------------------------------------------------------------------------
// Chart geometry
// ---------------------------------------------------------------------------

/// Position of each label on a categorical axis.
fn axis_positions(labels: &[String]) -> BTreeMap<&str, f64> {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i as f64))
        .collect()
}

/// One polyline per region, x = position of the survey round.
pub fn trend_lines(
    series: &BTreeMap<String, Vec<SeriesPoint>>,
    surveys: &[String],
) -> Vec<(String, Vec<[f64; 2]>)> {
    let x_of = axis_positions(surveys);
    series
        .iter()
        .map(|(region, points)| {
            let pts = points
                .iter()
                .filter_map(|(survey, v)| Some([*x_of.get(survey.as_str())?, *v]))
                .collect();
            (region.clone(), pts)
        })
        .collect()
}

/// Grouped bars: regions on the x axis, one bar per survey round side by
/// side within each region slot.  Returns the region labels and, per survey
/// round, its bars as `[x, value]`.
pub fn grouped_bars(groups: &[BarGroup]) -> (Vec<String>, Vec<(String, Vec<[f64; 2]>)>, f64) {
    let mut regions: Vec<String> = groups
        .iter()
        .flat_map(|(_, bars)| bars)
        .map(|(region, _)| region.clone())
        .collect();
    regions.sort_by(|a, b| natural_cmp(a, b));
    regions.dedup();

    let x_of = axis_positions(&regions);
    let n = groups.len().max(1) as f64;
    let width = 0.8 / n;

    let bars = groups
        .iter()
        .enumerate()
        .map(|(k, (survey, values))| {
            let offset = (k as f64 - (n - 1.0) / 2.0) * width;
            let pts = values
                .iter()
                .filter_map(|(region, v)| Some([x_of.get(region.as_str())? + offset, *v]))
                .collect();
            (survey.clone(), pts)
        })
        .collect();

    (regions, bars, width)
}

/// Tick labels for a categorical axis.  Crowded axes (every state and UT
/// at once) get truncated labels; full names stay in the hover text.
pub fn axis_labels(labels: &[String]) -> Vec<String> {
    if labels.len() <= DENSE_AXIS_LABELS {
        return labels.to_vec();
    }
    labels
        .iter()
        .map(|l| {
            if l.chars().count() <= SHORT_LABEL_CHARS + 1 {
                l.clone()
            } else {
                let head: String = l.chars().take(SHORT_LABEL_CHARS).collect();
                format!("{}…", head.trim_end())
            }
        })
        .collect()
}

/// Axis formatter printing `labels[i]` at integer positions only.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn notice(ui: &mut Ui, which: EmptyNotice) {
    ui.label(RichText::new(which.message()).color(ui.visuals().warn_fg_color));
}

// ---------------------------------------------------------------------------
// Trend chart
// ---------------------------------------------------------------------------

/// Line chart of the indicator across survey rounds, one line per region.
pub fn trend_chart(ui: &mut Ui, state: &AppState, table: &SurveyTable) {
    ui.heading("Trend by Survey Round");

    if state.view.trend.is_empty() {
        notice(ui, EmptyNotice::Trend);
        return;
    }

    let surveys = table.unique_values(Dimension::Survey).to_vec();
    let lines = trend_lines(&state.view.trend_series, &surveys);
    let y_label = state.indicator_name().unwrap_or_default().to_string();

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(table.dimension_name(Dimension::Survey).to_string())
        .y_axis_label(y_label)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(category_formatter(surveys))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (region, pts) in lines {
                let color = state.region_colors.color_for(&region);
                plot_ui.line(
                    Line::new(PlotPoints::from(pts.clone()))
                        .name(&region)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(&region)
                        .color(color)
                        .radius(3.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Comparison chart
// ---------------------------------------------------------------------------

/// Grouped bar chart of every region for the selected rounds and area types.
pub fn comparison_chart(ui: &mut Ui, state: &AppState, table: &SurveyTable) {
    ui.heading("State Comparison");

    if state.view.comparison.is_empty() {
        notice(ui, EmptyNotice::Comparison);
        return;
    }

    let (regions, groups, width) = grouped_bars(&state.view.comparison_groups);
    let y_label = state.indicator_name().unwrap_or_default().to_string();

    Plot::new("comparison_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(table.dimension_name(Dimension::Region).to_string())
        .y_axis_label(y_label)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(category_formatter(axis_labels(&regions)))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (survey, pts) in groups {
                let color = state.survey_colors.color_for(&survey);
                let bars: Vec<Bar> = pts
                    .iter()
                    .map(|&[x, v]| {
                        let region = regions.get(x.round() as usize).cloned().unwrap_or_default();
                        Bar::new(x, v).width(width).name(format!("{region} ({survey})"))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&survey).color(color));
            }
        });
}
