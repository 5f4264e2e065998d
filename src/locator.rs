use serde_json::{Map, Value};

use crate::error::LocateError;

pub const CUSTOM_ATTRIBUTES: &str = "custom_attributes";
pub const LOCALE: &str = "es-CR";

/// Walks `allVariants[0].attributesRaw` to the `custom_attributes` entry and
/// decodes its `es-CR` payload.
///
/// `Ok(None)` means the variant has no `custom_attributes` entry at all; the
/// caller stops quietly in that case.
pub fn locate(doc: Option<&Value>) -> Result<Option<Map<String, Value>>, LocateError> {
    let variants = doc
        .and_then(|d| d.get("allVariants"))
        .ok_or(LocateError::NoData)?;

    // A non-array `allVariants` has no first variant either.
    let first = variants
        .as_array()
        .and_then(|v| v.first())
        .ok_or(LocateError::NoVariants)?;

    let attributes = first
        .get("attributesRaw")
        .ok_or(LocateError::NoAttributes)?;

    let Some(entry) = attributes
        .as_array()
        .into_iter()
        .flatten()
        .find(|a| a.get("name").and_then(Value::as_str) == Some(CUSTOM_ATTRIBUTES))
    else {
        tracing::debug!("variant has no {CUSTOM_ATTRIBUTES} entry");
        return Ok(None);
    };

    let payload = entry
        .get("value")
        .and_then(|v| v.get(LOCALE))
        .ok_or_else(|| LocateError::MissingLocale {
            locale: LOCALE.to_string(),
        })?;

    decode_locale_payload(payload).map(Some)
}

fn decode_locale_payload(payload: &Value) -> Result<Map<String, Value>, LocateError> {
    let invalid = |reason: String| LocateError::InvalidLocalePayload {
        locale: LOCALE.to_string(),
        reason,
    };

    let text = payload
        .as_str()
        .ok_or_else(|| invalid("expected a JSON-encoded string".to_string()))?;

    match serde_json::from_str::<Value>(text).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => {
            tracing::debug!(fields = map.len(), "decoded {LOCALE} attributes");
            Ok(map)
        }
        _ => Err(invalid("expected a JSON object".to_string())),
    }
}
