mod config;
mod error;
mod extractor;
mod fetcher;
mod locator;
mod models;
mod pipeline;
mod writer;

use tracing_subscriber::EnvFilter;

use crate::config::ExportConfig;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Failures are reported on stdout; the exit status stays 0.
    let outcome = pipeline::fetch_and_save_as_csv(&ExportConfig::default());
    tracing::debug!(?outcome, "export finished");
}
