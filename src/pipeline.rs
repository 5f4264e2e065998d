use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::ExportConfig;
use crate::error::LocateError;
use crate::extractor::extract_attributes;
use crate::fetcher::fetch_json;
use crate::locator::locate;
use crate::writer::save_as_csv;

/// How a run ended. Every variant still exits the process with status 0.
#[derive(Debug)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// No `custom_attributes` entry; nothing printed, nothing written.
    NothingToExport,
    Aborted(LocateError),
    WriteFailed(anyhow::Error),
}

/// Fetch, locate, extract and write once, printing a diagnostic at each
/// point where the run stops.
pub fn fetch_and_save_as_csv(config: &ExportConfig) -> ExportOutcome {
    let doc = match fetch_json(&config.url) {
        Ok(doc) => Some(doc),
        Err(e) => {
            println!("Error making the request: {e}");
            None
        }
    };

    let outcome = export_document(doc.as_ref(), &config.output_path);
    match &outcome {
        ExportOutcome::Saved(path) => {
            println!("Data successfully saved in {}", path.display());
        }
        ExportOutcome::NothingToExport => {}
        ExportOutcome::Aborted(e) => println!("{e}"),
        ExportOutcome::WriteFailed(e) => println!("Error saving data to CSV: {e:#}"),
    }
    outcome
}

/// Everything after the fetch, so it can run against a document in hand.
pub fn export_document(doc: Option<&Value>, output_path: &Path) -> ExportOutcome {
    let attrs = match locate(doc) {
        Ok(Some(attrs)) => attrs,
        Ok(None) => return ExportOutcome::NothingToExport,
        Err(e) => return ExportOutcome::Aborted(e),
    };

    let record = extract_attributes(&attrs);
    tracing::debug!(?record, "extracted product attributes");

    match save_as_csv(output_path, &record) {
        Ok(()) => ExportOutcome::Saved(output_path.to_path_buf()),
        Err(e) => ExportOutcome::WriteFailed(e),
    }
}
