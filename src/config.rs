use std::path::PathBuf;

pub const PRODUCT_URL: &str =
    "https://storage.googleapis.com/resources-prod-shelftia/scrapers-prueba/product.json";
pub const OUTPUT_FILE: &str = "products.csv";

/// Where the product document comes from and where the row goes.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub url: String,
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            url: PRODUCT_URL.to_string(),
            output_path: PathBuf::from(OUTPUT_FILE),
        }
    }
}
