use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{SurveyRow, SurveyTable};
use crate::error::TableError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma separated
/// * `.tsv`, `.tab` – tab separated
///
/// Layout: header row, then region, survey round and area type columns
/// followed by one or more numeric indicator columns.
pub fn load_file(path: &Path) -> Result<SurveyTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" | "tab" => b'\t',
        _ => return Err(TableError::UnsupportedExtension(ext).into()),
    };

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let table = load_reader(file, delimiter)
        .with_context(|| format!("parsing {}", path.display()))?;

    if table.is_empty() {
        log::warn!("{} contains no data rows", path.display());
    }
    log::info!(
        "Loaded {} rows, {} indicators from {}",
        table.len(),
        table.indicator_names.len(),
        path.display()
    );
    Ok(table)
}

/// Parse a delimited survey table from any reader.
pub fn load_reader<R: Read>(reader: R, delimiter: u8) -> Result<SurveyTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(TableError::MissingHeader);
    }
    if headers.len() < 4 {
        return Err(TableError::TooFewColumns(headers.len()));
    }

    let dimension_names = [headers[0].clone(), headers[1].clone(), headers[2].clone()];
    let indicator_names: Vec<String> = headers[3..].to_vec();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 3 {
            return Err(TableError::RaggedRow {
                row: row_no + 1,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let indicators: Vec<Option<f64>> = (0..indicator_names.len())
            .map(|i| {
                let cell = record.get(i + 3).unwrap_or("");
                let parsed = parse_indicator(cell);
                if parsed.is_none() && !is_missing_marker(cell) {
                    skipped += 1;
                    log::debug!(
                        "Row {}, column '{}': '{cell}' is not a number, treated as missing",
                        row_no + 1,
                        indicator_names[i]
                    );
                }
                parsed
            })
            .collect();

        rows.push(SurveyRow {
            region: record[0].to_string(),
            survey: record[1].to_string(),
            area: record[2].to_string(),
            indicators,
        });
    }

    if skipped > 0 {
        log::warn!("{skipped} non-numeric indicator cells treated as missing");
    }

    Ok(SurveyTable::new(dimension_names, indicator_names, rows))
}

// -- Cell helpers --

fn is_missing_marker(cell: &str) -> bool {
    matches!(
        cell.to_ascii_lowercase().as_str(),
        "" | "na" | "nan" | "n/a" | "-" | "*"
    )
}

/// Parse one indicator cell.  NFHS marks estimates based on few cases with
/// parentheses, e.g. `(23.4)`; those keep their numeric value.
pub fn parse_indicator(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if is_missing_marker(cell) {
        return None;
    }
    let inner = cell
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .unwrap_or(cell)
        .trim();
    inner.parse::<f64>().ok().filter(|v| v.is_finite())
}
