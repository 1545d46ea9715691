use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::SurveyTable;

/// Write the header and the given rows as CSV.  Missing indicator cells
/// are written empty.
pub fn write_rows<W: Write>(table: &SurveyTable, rows: &[usize], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.column_names())
        .context("writing CSV header")?;

    for &i in rows {
        let Some(row) = table.rows.get(i) else {
            continue;
        };
        let mut record = vec![row.region.clone(), row.survey.clone(), row.area.clone()];
        record.extend(
            row.indicators
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)
            .with_context(|| format!("writing row {i}"))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Save the given rows to `path`.
pub fn save_rows(table: &SurveyTable, rows: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_rows(table, rows, file)?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;
    use crate::data::model::tests::sample_table;

    #[test]
    fn test_write_rows_only_selected() {
        let table = sample_table();
        let mut out = Vec::new();
        write_rows(&table, &[0, 1], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "India/States/UTs,Survey,Area,ind\nIndia,R1,Total,10\nIndia,R1,Total,\n"
        );
    }

    #[test]
    fn test_exported_rows_load_back() {
        let table = sample_table();
        let mut out = Vec::new();
        write_rows(&table, &[2, 0], &mut out).unwrap();
        let reloaded = load_reader(out.as_slice(), b',').unwrap();
        assert_eq!(reloaded.rows, vec![table.rows[2].clone(), table.rows[0].clone()]);
    }

    #[test]
    fn test_save_rows_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        save_rows(&sample_table(), &[], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "India/States/UTs,Survey,Area,ind\n");
    }
}
