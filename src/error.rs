use thiserror::Error;

/// Errors raised while reading a survey table.
#[derive(Error, Debug)]
pub enum TableError {
    /// The file extension does not map to a known delimiter.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// The input had no header row at all.
    #[error("Table has no header row")]
    MissingHeader,

    /// Region, survey, area plus at least one indicator are required.
    #[error("Table has {0} columns; expected region, survey, area and at least one indicator")]
    TooFewColumns(usize),

    /// A data row did not carry the three descriptive columns.
    #[error("Row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_columns_message() {
        let err = TableError::TooFewColumns(2);
        assert_eq!(
            err.to_string(),
            "Table has 2 columns; expected region, survey, area and at least one indicator"
        );
    }

    #[test]
    fn test_ragged_row_message() {
        let err = TableError::RaggedRow {
            row: 4,
            expected: 5,
            found: 2,
        };
        assert_eq!(err.to_string(), "Row 4: expected 5 fields, found 2");
    }
}
