use std::collections::{BTreeMap, BTreeSet};

use super::filter::FilterSelection;
use super::model::{SurveyRow, SurveyTable, natural_cmp};

/// Round to two decimal places, as displayed in the KPI panel.  Exact ties
/// go to the even neighbour: 1000.125 → 1000.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Mean of `indicator` over `rows`, ignoring missing cells, rounded to two
/// decimals.  `None` when no row carries a value.
pub fn compute_mean(table: &SurveyTable, rows: &[usize], indicator: usize) -> Option<f64> {
    let (sum, count) = rows
        .iter()
        .filter_map(|&i| table.rows.get(i)?.indicator(indicator))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }
    Some(round2(sum / count as f64))
}

/// Rows for the cross-region comparison: survey round and area type
/// membership only, region selection ignored.  Rows missing `indicator`
/// are dropped.
pub fn comparison_rows(
    table: &SurveyTable,
    surveys: &BTreeSet<String>,
    areas: &BTreeSet<String>,
    indicator: usize,
) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            surveys.contains(&row.survey)
                && areas.contains(&row.area)
                && row.indicator(indicator).is_some()
        })
        .map(|(i, _)| i)
        .collect()
}

/// Convenience wrapper taking the whole selection; the region set is unused.
pub fn comparison_rows_for(
    table: &SurveyTable,
    selection: &FilterSelection,
    indicator: usize,
) -> Vec<usize> {
    comparison_rows(table, &selection.surveys, &selection.areas, indicator)
}

/// Rows of an already filtered subset that carry a value for `indicator`.
pub fn trend_rows(table: &SurveyTable, filtered: &[usize], indicator: usize) -> Vec<usize> {
    filtered
        .iter()
        .copied()
        .filter(|&i| {
            table
                .rows
                .get(i)
                .and_then(|row| row.indicator(indicator))
                .is_some()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping for the charts
// ---------------------------------------------------------------------------

/// One plotted point: survey round and value.
pub type SeriesPoint = (String, f64);

/// Group `rows` by `key`, each group's points ordered by survey round.
///
/// Several rows sharing a group and survey round (e.g. more than one area
/// type selected) stay as separate points, in file order.
fn group_by_survey(
    table: &SurveyTable,
    rows: &[usize],
    indicator: usize,
    key: impl Fn(&SurveyRow) -> String,
) -> BTreeMap<String, Vec<SeriesPoint>> {
    let mut groups: BTreeMap<String, Vec<SeriesPoint>> = BTreeMap::new();
    for &i in rows {
        let Some(row) = table.rows.get(i) else {
            continue;
        };
        let Some(value) = row.indicator(indicator) else {
            continue;
        };
        groups
            .entry(key(row))
            .or_default()
            .push((row.survey.clone(), value));
    }
    for points in groups.values_mut() {
        // Stable: ties keep file order.
        points.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    }
    groups
}

/// Trend lines: region → points ordered by survey round.
pub fn trend_series(
    table: &SurveyTable,
    trend: &[usize],
    indicator: usize,
) -> BTreeMap<String, Vec<SeriesPoint>> {
    group_by_survey(table, trend, indicator, |row| row.region.clone())
}

/// One bar group: survey round and its (region, value) bars in file order.
pub type BarGroup = (String, Vec<(String, f64)>);

/// Grouped bars, one group per survey round in natural round order.
pub fn comparison_groups(
    table: &SurveyTable,
    comparison: &[usize],
    indicator: usize,
) -> Vec<BarGroup> {
    let mut groups: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
    for &i in comparison {
        let Some(row) = table.rows.get(i) else {
            continue;
        };
        if let Some(value) = row.indicator(indicator) {
            groups
                .entry(row.survey.clone())
                .or_default()
                .push((row.region.clone(), value));
        }
    }
    let mut groups: Vec<BarGroup> = groups.into_iter().collect();
    groups.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_rows;
    use crate::data::model::tests::{row, sample_table};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn selection(regions: &[&str], surveys: &[&str], areas: &[&str]) -> FilterSelection {
        FilterSelection {
            regions: set(regions),
            surveys: set(surveys),
            areas: set(areas),
        }
    }

    fn multi_round_table() -> SurveyTable {
        SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["x".into(), "y".into()],
            vec![
                row("Kerala", "NFHS-5", "Total", &[Some(5.0), None]),
                row("India", "NFHS-5", "Total", &[Some(3.0), Some(1.0)]),
                row("Kerala", "NFHS-4", "Total", &[Some(4.0), None]),
                row("India", "NFHS-4", "Total", &[None, Some(2.0)]),
                row("Assam", "NFHS-4", "Rural", &[Some(9.0), Some(9.0)]),
            ],
        )
    }

    // ── compute_mean ──────────────────────────────────────────────────────────

    #[test]
    fn test_mean_excludes_missing_values() {
        let table = sample_table();
        let filtered = filter_rows(&table, &selection(&["India"], &["R1"], &["Total"]));
        assert_eq!(compute_mean(&table, &filtered, 0), Some(10.0));
    }

    #[test]
    fn test_mean_of_empty_selection_is_none() {
        let table = sample_table();
        let filtered = filter_rows(&table, &selection(&[], &["R1"], &["Total"]));
        assert_eq!(compute_mean(&table, &filtered, 0), None);
    }

    #[test]
    fn test_mean_with_only_missing_values_is_none_not_zero() {
        let table = sample_table();
        assert_eq!(compute_mean(&table, &[1], 0), None);
    }

    #[test]
    fn test_mean_rounds_to_two_decimals() {
        let table = SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["x".into()],
            vec![
                row("A", "1", "T", &[Some(1.0)]),
                row("B", "1", "T", &[Some(2.0)]),
                row("C", "1", "T", &[Some(2.0)]),
            ],
        );
        assert_eq!(compute_mean(&table, &[0, 1, 2], 0), Some(1.67));
    }

    #[test]
    fn test_mean_is_order_independent() {
        let table = multi_round_table();
        let forward = compute_mean(&table, &[0, 1, 2, 4], 0);
        let reversed = compute_mean(&table, &[4, 2, 1, 0], 0);
        assert_eq!(forward, reversed);
        assert_eq!(forward, Some(5.25));
    }

    // ── comparison_rows ───────────────────────────────────────────────────────

    #[test]
    fn test_comparison_ignores_region_selection() {
        let table = multi_round_table();
        let rounds = ["NFHS-4", "NFHS-5"];
        let a = comparison_rows_for(&table, &selection(&["India"], &rounds, &["Total"]), 0);
        let b = comparison_rows_for(&table, &selection(&[], &rounds, &["Total"]), 0);
        let c = comparison_rows_for(
            &table,
            &selection(&["Assam", "Kerala"], &rounds, &["Total"]),
            0,
        );
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, vec![0, 1, 2]);
    }

    #[test]
    fn test_comparison_drops_missing_indicator() {
        let table = multi_round_table();
        let rows = comparison_rows(&table, &set(&["NFHS-4"]), &set(&["Total", "Rural"]), 1);
        assert_eq!(rows, vec![3, 4]);
    }

    // ── trend ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_trend_rows_drop_missing_from_filtered_subset() {
        let table = multi_round_table();
        let sel = selection(&["India", "Kerala"], &["NFHS-4", "NFHS-5"], &["Total"]);
        let filtered = filter_rows(&table, &sel);
        assert_eq!(filtered, vec![0, 1, 2, 3]);
        assert_eq!(trend_rows(&table, &filtered, 0), vec![0, 1, 2]);
        assert_eq!(trend_rows(&table, &filtered, 1), vec![1, 3]);
    }

    #[test]
    fn test_trend_series_groups_by_region_ordered_by_survey() {
        let table = multi_round_table();
        let trend = trend_rows(&table, &[0, 1, 2, 3], 0);
        let series = trend_series(&table, &trend, 0);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series["Kerala"],
            vec![("NFHS-4".to_string(), 4.0), ("NFHS-5".to_string(), 5.0)]
        );
        assert_eq!(series["India"], vec![("NFHS-5".to_string(), 3.0)]);
    }

    #[test]
    fn test_comparison_groups_by_survey() {
        let table = multi_round_table();
        let rows = comparison_rows(&table, &set(&["NFHS-4", "NFHS-5"]), &set(&["Total"]), 0);
        let groups = comparison_groups(&table, &rows, 0);
        assert_eq!(
            groups,
            vec![
                ("NFHS-4".to_string(), vec![("Kerala".to_string(), 4.0)]),
                (
                    "NFHS-5".to_string(),
                    vec![("Kerala".to_string(), 5.0), ("India".to_string(), 3.0)]
                ),
            ]
        );
    }

    #[test]
    fn test_numeric_rounds_order_by_value() {
        let table = SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["x".into()],
            vec![
                row("India", "10", "Total", &[Some(2.0)]),
                row("India", "9", "Total", &[Some(1.0)]),
            ],
        );
        let series = trend_series(&table, &[0, 1], 0);
        assert_eq!(
            series["India"],
            vec![("9".to_string(), 1.0), ("10".to_string(), 2.0)]
        );

        let groups = comparison_groups(&table, &[0, 1], 0);
        let rounds: Vec<&str> = groups.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(rounds, vec!["9", "10"]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.345_6), 2.35);
        assert_eq!(round2(-1.004), -1.0);
    }

    #[test]
    fn test_mean_rounds_exact_ties_to_even() {
        let mut rows = vec![row("India", "NFHS-5", "Total", &[Some(1001.0)])];
        rows.extend((0..7).map(|_| row("India", "NFHS-5", "Total", &[Some(1000.0)])));
        let table = SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["Sex ratio".into()],
            rows,
        );
        let all: Vec<usize> = (0..table.len()).collect();
        assert_eq!(compute_mean(&table, &all, 0), Some(1000.12));
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }
}
