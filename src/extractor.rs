use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::{Attribute, ExtractedRecord};

const FLAG_DEFAULT: &str = "FALSE";

/// Pulls the eleven export fields out of the locale attributes.
///
/// Each field is looked up as `attrs[field].value`; a missing field or a
/// missing `value` falls back to that field's default.
pub fn extract_attributes(attrs: &Map<String, Value>) -> ExtractedRecord {
    ExtractedRecord {
        allergens: allergen_names(attrs),
        sku: field(attrs, "sku", String::new()),
        vegan: field(attrs, "vegan", FLAG_DEFAULT.to_string()),
        kosher: field(attrs, "kosher", FLAG_DEFAULT.to_string()),
        organic: field(attrs, "organic", FLAG_DEFAULT.to_string()),
        vegetarian: field(attrs, "vegetarian", FLAG_DEFAULT.to_string()),
        gluten_free: field(attrs, "gluten_free", FLAG_DEFAULT.to_string()),
        lactose_free: field(attrs, "lactose_free", FLAG_DEFAULT.to_string()),
        package_quantity: measure(attrs, "package_quantity", 1.0),
        unit_size: measure(attrs, "unit_size", 0.0),
        net_weight: measure(attrs, "net_weight", 0.0),
    }
}

fn raw_value<'a>(attrs: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    attrs.get(name).and_then(|f| f.get("value"))
}

fn field<T: DeserializeOwned>(
    attrs: &Map<String, Value>,
    name: &str,
    default: T,
) -> Attribute<T> {
    match raw_value(attrs, name) {
        None => Attribute::Typed(default),
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(typed) => Attribute::Typed(typed),
            Err(_) => Attribute::Raw(value.clone()),
        },
    }
}

// Only JSON floats are typed; integers stay raw so they print as written.
fn measure(attrs: &Map<String, Value>, name: &str, default: f64) -> Attribute<f64> {
    match raw_value(attrs, name) {
        None => Attribute::Typed(default),
        Some(Value::Number(n)) if n.is_f64() => match n.as_f64() {
            Some(f) => Attribute::Typed(f),
            None => Attribute::Raw(Value::Number(n.clone())),
        },
        Some(value) => Attribute::Raw(value.clone()),
    }
}

fn allergen_names(attrs: &Map<String, Value>) -> Vec<String> {
    let Some(value) = raw_value(attrs, "allergens") else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        tracing::debug!(%value, "allergens value is not a list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry.get("name").and_then(Value::as_str) {
            Some(name) => Some(name.to_string()),
            None => {
                tracing::debug!(%entry, "skipping allergen without a name");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn defaults() -> ExtractedRecord {
        ExtractedRecord {
            allergens: Vec::new(),
            sku: String::new().into(),
            vegan: "FALSE".to_string().into(),
            kosher: "FALSE".to_string().into(),
            organic: "FALSE".to_string().into(),
            vegetarian: "FALSE".to_string().into(),
            gluten_free: "FALSE".to_string().into(),
            lactose_free: "FALSE".to_string().into(),
            package_quantity: Attribute::Typed(1.0),
            unit_size: Attribute::Typed(0.0),
            net_weight: Attribute::Typed(0.0),
        }
    }

    #[test]
    fn absent_fields_take_defaults() {
        assert_eq!(extract_attributes(&Map::new()), defaults());
    }

    #[test]
    fn fields_without_value_take_defaults() {
        let record = extract_attributes(&attrs(json!({
            "allergens": {"label": "Alérgenos"},
            "sku": {},
            "vegan": {"label": "Vegano"},
            "kosher": {},
            "organic": {},
            "vegetarian": {},
            "gluten_free": {},
            "lactose_free": {},
            "package_quantity": {"unit": "u"},
            "unit_size": {},
            "net_weight": {"unit": "g"}
        })));
        assert_eq!(record, defaults());
    }

    #[test]
    fn allergen_names_keep_order_and_duplicates() {
        let record = extract_attributes(&attrs(json!({
            "allergens": {"value": [{"name": "X"}, {"name": "Y"}, {"name": "X"}]}
        })));
        assert_eq!(record.allergens, vec!["X", "Y", "X"]);
    }

    #[test]
    fn allergen_entries_without_name_are_skipped() {
        let record = extract_attributes(&attrs(json!({
            "allergens": {"value": [{"name": "Soy"}, {"code": 3}]}
        })));
        assert_eq!(record.allergens, vec!["Soy"]);
    }

    #[test]
    fn present_values_are_used() {
        let record = extract_attributes(&attrs(json!({
            "sku": {"value": "ABC123"},
            "vegan": {"value": "TRUE"},
            "package_quantity": {"value": 6},
            "net_weight": {"value": 355.5}
        })));
        assert_eq!(record.sku, Attribute::Typed("ABC123".to_string()));
        assert_eq!(record.vegan, Attribute::Typed("TRUE".to_string()));
        assert_eq!(record.package_quantity, Attribute::Raw(json!(6)));
        assert_eq!(record.net_weight, Attribute::Typed(355.5));
        assert_eq!(record.kosher, Attribute::Typed("FALSE".to_string()));
    }

    #[test]
    fn mistyped_values_are_kept_verbatim() {
        let record = extract_attributes(&attrs(json!({
            "organic": {"value": true},
            "unit_size": {"value": "12 oz"},
            "sku": {"value": null}
        })));
        assert_eq!(record.organic, Attribute::Raw(json!(true)));
        assert_eq!(record.unit_size, Attribute::Raw(json!("12 oz")));
        assert_eq!(record.sku, Attribute::Raw(Value::Null));
    }

    #[test]
    fn integer_measures_render_as_written() {
        let record = extract_attributes(&attrs(json!({
            "package_quantity": {"value": 6},
            "net_weight": {"value": 12345678901234567891_u64}
        })));
        let row = record.to_csv_record();
        assert_eq!(row[8], "6");
        assert_eq!(row[10], "12345678901234567891");
        assert_eq!(row[9], "0.0");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn malformed_allergens_are_quiet_at_default_level() {
        let log = CapturedLog::default();
        let sink = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || sink.clone())
            .finish();

        let record = tracing::subscriber::with_default(subscriber, || {
            extract_attributes(&attrs(json!({
                "allergens": {"value": [{"code": 3}, {"name": "Soy"}]},
                "unit_size": {"value": "12 oz"}
            })))
        });

        assert_eq!(record.allergens, vec!["Soy"]);
        assert!(log.0.lock().unwrap().is_empty());
    }
}
