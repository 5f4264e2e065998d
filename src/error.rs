use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid JSON body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Structural absences that stop the export before anything is written.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("No data found.")]
    NoData,

    #[error("No variants found.")]
    NoVariants,

    #[error("No attributes found.")]
    NoAttributes,

    #[error("No \"{locale}\" entry in custom_attributes.")]
    MissingLocale { locale: String },

    #[error("Invalid \"{locale}\" attribute payload: {reason}")]
    InvalidLocalePayload { locale: String, reason: String },
}
