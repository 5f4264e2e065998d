use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{CSV_HEADERS, ExtractedRecord};

/// Writes the header row and one data row, tab-delimited, replacing `path`.
pub fn save_as_csv(path: &Path, record: &ExtractedRecord) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    wtr.write_record(CSV_HEADERS)?;
    wtr.write_record(record.to_csv_record())?;
    wtr.flush()?;

    tracing::info!(path = %path.display(), "saved product row");
    Ok(())
}
