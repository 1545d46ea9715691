use std::collections::BTreeSet;

use super::model::{Dimension, SurveyRow, SurveyTable};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per descriptive column
// ---------------------------------------------------------------------------

/// Allowed values per descriptive column.
///
/// An empty set selects nothing; several values are a union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub surveys: BTreeSet<String>,
    pub areas: BTreeSet<String>,
}

impl FilterSelection {
    /// The dashboard's opening selection: the preferred region and area type
    /// with every survey round.  A preference missing from the table falls
    /// back to the first available value.
    pub fn initial(table: &SurveyTable, region: &str, area: &str) -> Self {
        FilterSelection {
            regions: preferred_or_first(table, Dimension::Region, region),
            surveys: table.unique_values(Dimension::Survey).iter().cloned().collect(),
            areas: preferred_or_first(table, Dimension::Area, area),
        }
    }

    pub fn get(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Survey => &self.surveys,
            Dimension::Area => &self.areas,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::Survey => &mut self.surveys,
            Dimension::Area => &mut self.areas,
        }
    }

    /// Whether `row` passes all three membership tests.
    pub fn matches(&self, row: &SurveyRow) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| self.get(d).contains(row.value(d)))
    }
}

fn preferred_or_first(
    table: &SurveyTable,
    dimension: Dimension,
    preferred: &str,
) -> BTreeSet<String> {
    let values = table.unique_values(dimension);
    if values.iter().any(|v| v == preferred) {
        return BTreeSet::from([preferred.to_string()]);
    }
    match values.first() {
        Some(first) => {
            log::warn!(
                "{} '{preferred}' not found in data, defaulting to '{first}'",
                table.dimension_name(dimension)
            );
            BTreeSet::from([first.clone()])
        }
        None => BTreeSet::new(),
    }
}

/// Return indices of rows whose region, survey round and area type are each
/// members of the corresponding selection set.  File order is preserved.
pub fn filter_rows(table: &SurveyTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.matches(row))
        .map(|(i, _)| i)
        .collect()
}
