use std::cmp::Ordering;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Dimension – one of the three descriptive columns
// ---------------------------------------------------------------------------

/// The descriptive columns every survey table starts with, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Region,
    Survey,
    Area,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::Survey, Dimension::Area];

    /// Label used in the filter sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "State(s)",
            Dimension::Survey => "Survey Round",
            Dimension::Area => "Area Type",
        }
    }
}

// ---------------------------------------------------------------------------
// Natural ordering of labels
// ---------------------------------------------------------------------------

/// Split a label into alternating text and digit runs.
fn split_numeric_parts(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_number = None;
    for (i, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        if in_number.is_some_and(|n| n != digit) {
            parts.push(&s[start..i]);
            start = i;
        }
        in_number = Some(digit);
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

/// Compare two digit runs by numeric value without parsing.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware label ordering: `9 < 10`, `NFHS-9 < NFHS-10`.
/// Labels equal under that rule fall back to plain string order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_parts = split_numeric_parts(a);
    let b_parts = split_numeric_parts(b);

    for (x, y) in a_parts.iter().zip(b_parts.iter()) {
        let x_num = x.starts_with(|c: char| c.is_ascii_digit());
        let y_num = y.starts_with(|c: char| c.is_ascii_digit());
        let ord = match (x_num, y_num) {
            (true, true) => compare_digits(x, y),
            (false, false) => x.cmp(y),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a_parts
        .len()
        .cmp(&b_parts.len())
        .then_with(|| a.cmp(b))
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.collect();
    let mut sorted: Vec<String> = unique.into_iter().map(str::to_string).collect();
    sorted.sort_by(|a, b| natural_cmp(a, b));
    sorted
}

// ---------------------------------------------------------------------------
// SurveyRow – one row of the source table
// ---------------------------------------------------------------------------

/// A single row: three descriptive values followed by the indicator cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRow {
    pub region: String,
    pub survey: String,
    pub area: String,
    /// One cell per indicator column, `None` where the value is missing.
    pub indicators: Vec<Option<f64>>,
}

impl SurveyRow {
    /// Descriptive value of this row for the given dimension.
    pub fn value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Survey => &self.survey,
            Dimension::Area => &self.area,
        }
    }

    /// Indicator value at `indicator`; `None` if missing or out of range.
    pub fn indicator(&self, indicator: usize) -> Option<f64> {
        self.indicators.get(indicator).copied().flatten()
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed option indices.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    /// Header names of the region, survey and area columns, as read.
    pub dimension_names: [String; 3],
    /// Header names of the indicator columns, in file order.
    pub indicator_names: Vec<String>,
    /// All rows, in file order.
    pub rows: Vec<SurveyRow>,
    regions: Vec<String>,
    surveys: Vec<String>,
    areas: Vec<String>,
}

impl SurveyTable {
    /// Build option indices from the loaded rows.
    pub fn new(
        dimension_names: [String; 3],
        indicator_names: Vec<String>,
        rows: Vec<SurveyRow>,
    ) -> Self {
        let regions = sorted_unique(rows.iter().map(|r| r.region.as_str()));
        let surveys = sorted_unique(rows.iter().map(|r| r.survey.as_str()));
        let areas = sorted_unique(rows.iter().map(|r| r.area.as_str()));

        SurveyTable {
            dimension_names,
            indicator_names,
            rows,
            regions,
            surveys,
            areas,
        }
    }

    /// Unique values of a descriptive column in natural order.
    pub fn unique_values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Survey => &self.surveys,
            Dimension::Area => &self.areas,
        }
    }

    /// Header name of a descriptive column.
    pub fn dimension_name(&self, dimension: Dimension) -> &str {
        &self.dimension_names[dimension as usize]
    }

    /// Position of an indicator column by header name.
    pub fn indicator_index(&self, name: &str) -> Option<usize> {
        self.indicator_names.iter().position(|n| n == name)
    }

    /// All header names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.dimension_names
            .iter()
            .chain(self.indicator_names.iter())
            .map(String::as_str)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(
        region: &str,
        survey: &str,
        area: &str,
        values: &[Option<f64>],
    ) -> SurveyRow {
        SurveyRow {
            region: region.to_string(),
            survey: survey.to_string(),
            area: area.to_string(),
            indicators: values.to_vec(),
        }
    }

    /// Three-row table used across the data-layer tests.
    pub(crate) fn sample_table() -> SurveyTable {
        SurveyTable::new(
            [
                "India/States/UTs".to_string(),
                "Survey".to_string(),
                "Area".to_string(),
            ],
            vec!["ind".to_string()],
            vec![
                row("India", "R1", "Total", &[Some(10.0)]),
                row("India", "R1", "Total", &[None]),
                row("Kerala", "R1", "Total", &[Some(20.0)]),
            ],
        )
    }

    #[test]
    fn test_unique_values_are_sorted_and_deduplicated() {
        let table = SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["x".into()],
            vec![
                row("Kerala", "NFHS-5", "Urban", &[Some(1.0)]),
                row("Assam", "NFHS-4", "Rural", &[Some(2.0)]),
                row("Kerala", "NFHS-4", "Urban", &[None]),
            ],
        );
        let regions: Vec<&str> = table
            .unique_values(Dimension::Region)
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(regions, vec!["Assam", "Kerala"]);
        assert_eq!(table.unique_values(Dimension::Survey).len(), 2);
        assert_eq!(table.unique_values(Dimension::Area).len(), 2);
    }

    #[test]
    fn test_column_lookup() {
        let table = sample_table();
        assert_eq!(table.dimension_name(Dimension::Region), "India/States/UTs");
        assert_eq!(table.dimension_name(Dimension::Area), "Area");
        assert_eq!(table.indicator_index("ind"), Some(0));
        assert_eq!(table.indicator_index("missing"), None);
        let cols: Vec<&str> = table.column_names().collect();
        assert_eq!(cols, vec!["India/States/UTs", "Survey", "Area", "ind"]);
    }

    #[test]
    fn test_row_indicator_out_of_range_is_missing() {
        let r = row("India", "R1", "Total", &[Some(3.5)]);
        assert_eq!(r.indicator(0), Some(3.5));
        assert_eq!(r.indicator(1), None);
        assert_eq!(r.value(Dimension::Survey), "R1");
    }

    #[test]
    fn test_natural_cmp_orders_digit_runs_numerically() {
        assert_eq!(natural_cmp("9", "10"), Ordering::Less);
        assert_eq!(natural_cmp("NFHS-10", "NFHS-9"), Ordering::Greater);
        assert_eq!(natural_cmp("NFHS-4", "NFHS-4"), Ordering::Equal);
        assert_eq!(natural_cmp("Round 2", "Round 2a"), Ordering::Less);
        assert_eq!(natural_cmp("Assam", "Bihar"), Ordering::Less);
        // Same numeric value, different spelling: still a total order.
        assert_eq!(natural_cmp("09", "9"), Ordering::Less);
    }

    #[test]
    fn test_numeric_survey_rounds_sort_by_value() {
        let table = SurveyTable::new(
            ["r".into(), "s".into(), "a".into()],
            vec!["x".into()],
            vec![
                row("India", "10", "Total", &[Some(2.0)]),
                row("India", "9", "Total", &[Some(1.0)]),
                row("India", "NFHS-10", "Total", &[None]),
                row("India", "NFHS-9", "Total", &[None]),
            ],
        );
        assert_eq!(
            table.unique_values(Dimension::Survey),
            ["9", "10", "NFHS-9", "NFHS-10"]
        );
    }
}
