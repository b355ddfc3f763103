//! JSON persistence for master mapping seeds.
//!
//! A seed file is a single JSON object of MSKU to SKU variant lists:
//!
//! ```json
//! {
//!   "WIRELESS_HEADPHONES": ["WH001", "HEADPHONE_BT"],
//!   "COFFEE_MUG": ["CM002", "MUG_CERAMIC"]
//! }
//! ```
//!
//! Entry order is kept on load and save, since lookups depend on it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use msku_model::{MasterMapping, VariantSet};

/// A master mapping seed stored at a fixed path.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    path: PathBuf,
}

impl MappingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the seed. A missing file yields an empty mapping.
    pub fn load(&self) -> Result<MasterMapping> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no mapping seed, starting empty");
            return Ok(MasterMapping::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read mappings from {}", self.path.display()))?;
        let mapping: MasterMapping = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mappings from {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            categories = mapping.len(),
            "loaded mapping seed"
        );
        Ok(mapping)
    }

    /// Writes `mapping` as pretty JSON, creating parent directories as needed.
    pub fn save(&self, mapping: &MasterMapping) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(mapping).context("Failed to serialize mappings")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write mappings to {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            categories = mapping.len(),
            "saved mapping seed"
        );
        Ok(())
    }
}

/// Built-in demo vocabulary covering common marketplace ASINs and a few
/// generic product codes.
pub fn sample_mappings() -> MasterMapping {
    const SAMPLES: &[(&str, &[&str])] = &[
        (
            "WIRELESS_HEADPHONES",
            &["X0024AAU4D", "X0024A2EYH", "WH001", "HEADPHONE_BT"],
        ),
        ("PHONE_ACCESSORIES", &["X0027Z4S1L", "X0026EWNTH", "X0027375Z"]),
        ("CHARGING_CABLES", &["X0025L96YB", "X001VSXA73", "X001W7Q1M9"]),
        ("PHONE_CASES", &["X001W7X2XZ", "X0026ER40F", "CASE_001"]),
        (
            "ELECTRONIC_ACCESSORIES",
            &["X0024AAU4D", "X0024A2EYH", "X0027Z4S1L"],
        ),
        ("MOBILE_ACCESSORIES", &["X0026EWNTH", "X0027375Z", "X0025L96YB"]),
        ("TECH_GADGETS", &["X001VSXA73", "X001W7Q1M9", "X001W7X2XZ"]),
        ("DEVICE_ACCESSORIES", &["X0026ER40F"]),
        ("GOLDEN_APPLE", &["GLD", "GOLD_APPLE", "Golden_Apple_001"]),
        ("SILVER_RING", &["SLV_RNG", "SILVER_RING", "Ring_Silver"]),
        ("BLUE_JEANS", &["BLU_JNS", "BLUE_JEANS", "Jeans_Blue_M"]),
    ];

    SAMPLES
        .iter()
        .map(|(msku, variants)| {
            (
                (*msku).to_string(),
                variants.iter().map(|v| (*v).to_string()).collect::<VariantSet>(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_mappings_keep_declared_order() {
        let mapping = sample_mappings();
        assert_eq!(mapping.len(), 11);
        assert_eq!(mapping.keys().next(), Some("WIRELESS_HEADPHONES"));
        // X0024AAU4D is listed twice; the earlier category claims it.
        assert_eq!(mapping.find_canonical("X0024AAU4D"), Some("WIRELESS_HEADPHONES"));
    }
}
