use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect;
use serde_json::Value;

use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;

/// Single GET for `url`, body parsed as JSON. No retries, no timeout.
pub fn fetch_json(url: &str) -> Result<Value, FetchError> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error(format!("Too many redirects (>{MAX_REDIRECTS})"))
        } else {
            attempt.follow()
        }
    });

    // The blocking client otherwise gives up after 30 seconds.
    let client = Client::builder()
        .redirect(redirect_policy)
        .timeout(None::<Duration>)
        .build()?;

    tracing::debug!(url, "fetching product document");
    let resp = client.get(url).send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text()?;
    let doc = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })?;
    tracing::debug!(url, bytes = body.len(), "fetched product document");
    Ok(doc)
}
