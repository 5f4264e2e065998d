use serde_json::Value;

/// Column order of the exported row.
pub const CSV_HEADERS: [&str; 11] = [
    "allergens",
    "sku",
    "vegan",
    "kosher",
    "organic",
    "vegetarian",
    "gluten_free",
    "lactose_free",
    "package_quantity",
    "unit_size",
    "net_weight",
];

/// An attribute value with a declared type.
///
/// Values whose JSON type doesn't match the declared one are carried over
/// untouched as `Raw` instead of being coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<T> {
    Typed(T),
    Raw(Value),
}

impl<T> From<T> for Attribute<T> {
    fn from(value: T) -> Self {
        Attribute::Typed(value)
    }
}

pub trait ToCell {
    fn to_cell(&self) -> String;
}

impl ToCell for String {
    fn to_cell(&self) -> String {
        self.clone()
    }
}

impl ToCell for f64 {
    // Always keep a fractional part: 1.0, not 1.
    fn to_cell(&self) -> String {
        format!("{self:?}")
    }
}

impl ToCell for Value {
    fn to_cell(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl<T: ToCell> ToCell for Attribute<T> {
    fn to_cell(&self) -> String {
        match self {
            Attribute::Typed(value) => value.to_cell(),
            Attribute::Raw(value) => value.to_cell(),
        }
    }
}

impl ToCell for Vec<String> {
    /// Bracketed list literal, e.g. `['Milk', 'Soy']`.
    fn to_cell(&self) -> String {
        let items: Vec<String> = self.iter().map(|s| quote_item(s)).collect();
        format!("[{}]", items.join(", "))
    }
}

fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if u32::from(c) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// The flat record written as the single data row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecord {
    pub allergens: Vec<String>,
    pub sku: Attribute<String>,
    pub vegan: Attribute<String>,
    pub kosher: Attribute<String>,
    pub organic: Attribute<String>,
    pub vegetarian: Attribute<String>,
    pub gluten_free: Attribute<String>,
    pub lactose_free: Attribute<String>,
    pub package_quantity: Attribute<f64>,
    pub unit_size: Attribute<f64>,
    pub net_weight: Attribute<f64>,
}

impl ExtractedRecord {
    pub fn to_csv_record(&self) -> [String; 11] {
        [
            self.allergens.to_cell(),
            self.sku.to_cell(),
            self.vegan.to_cell(),
            self.kosher.to_cell(),
            self.organic.to_cell(),
            self.vegetarian.to_cell(),
            self.gluten_free.to_cell(),
            self.lactose_free.to_cell(),
            self.package_quantity.to_cell(),
            self.unit_size.to_cell(),
            self.net_weight.to_cell(),
        ]
    }
}
