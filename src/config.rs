//! Run configuration: target city, column layout, size categories and file names.
//!
//! Every field has a default, so an empty JSON object is a valid config file:
//! ```json
//! {
//!   "city": "New York",
//!   "extremes_seed": "legacy"
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// How the running cohort extremes start out before the first ZIP is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremesSeed {
    /// Start empty and collapse onto the first ZIP's values.
    #[default]
    Observed,
    /// Start from the fixed 0/100, -100/100, 0/100 bounds.
    Legacy,
}

/// One apartment size: where its rents come from, where its index goes, and the
/// city-wide median rent its ZIPs are compared against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SizeCategory {
    pub name: String,
    pub input_file: String,
    pub output_file: String,
    pub city_median_price: f64,
}

impl SizeCategory {
    fn new(name: &str, city_median_price: f64) -> Self {
        SizeCategory {
            name: name.to_string(),
            input_file: format!("{name}_zip.csv"),
            output_file: format!("{name}.csv"),
            city_median_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RaterConfig {
    pub city: String,
    /// Index of the first monthly rent column; earlier columns are metadata.
    pub rent_column_offset: usize,
    pub categories: Vec<SizeCategory>,
    pub density_file: String,
    pub general_output_file: String,
    pub extremes_seed: ExtremesSeed,
}

impl Default for RaterConfig {
    fn default() -> Self {
        RaterConfig {
            city: "New York".to_string(),
            rent_column_offset: 6,
            categories: vec![
                SizeCategory::new("studio", 2199.0),
                SizeCategory::new("one", 2390.0),
                SizeCategory::new("two", 2694.5),
                SizeCategory::new("three", 3000.0),
                SizeCategory::new("four", 3700.0),
                SizeCategory::new("five", 4496.5),
            ],
            density_file: "population-density-zip.csv".to_string(),
            general_output_file: "general-data.csv".to_string(),
            extremes_seed: ExtremesSeed::default(),
        }
    }
}

impl RaterConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: RaterConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
