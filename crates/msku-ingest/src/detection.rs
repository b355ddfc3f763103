//! Identifier column detection.
//!
//! Two phases, in order:
//!
//! 1. **Keyword**: column names (lowercased) are searched for indicator
//!    keywords. Groups are tried by priority, keywords within a group in
//!    order, and columns in frame order for each keyword.
//! 2. **Value sample**: each column's first non-null values are checked for an
//!    identifier-like shape. The first column where enough of the sample
//!    qualifies is chosen.

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::values::non_null_sample;

/// Indicator keyword groups, highest priority first.
pub const INDICATOR_GROUPS: &[&[&str]] = &[
    &["sku", "stock_keeping_unit"],
    &["product_id", "product_code", "item_id", "item_code"],
    &["order_item_id", "orderitem", "order_id"],
    &["product", "item", "part"],
    &["code", "id"],
];

const MIN_IDENTIFIER_LEN: usize = 3;

/// Tuning for the value-sample phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionOptions {
    /// Number of non-null values inspected per column.
    pub sample_size: usize,
    /// Share of the sample that must look like identifiers.
    pub min_identifier_ratio: f64,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            sample_size: 10,
            min_identifier_ratio: 0.7,
        }
    }
}

/// How a column was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Column name contains an indicator keyword.
    Keyword { keyword: String },
    /// Enough sampled values looked like identifiers.
    ValueSample { ratio: f64 },
}

/// A detected identifier column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDetection {
    pub column: String,
    #[serde(flatten)]
    pub method: DetectionMethod,
}

/// Returns the name of the column most likely to hold product identifiers.
pub fn detect_identifier_column(df: &DataFrame) -> Option<String> {
    detect_identifier_column_with(df, &DetectionOptions::default()).map(|found| found.column)
}

/// Like [`detect_identifier_column`], also reporting which phase matched.
pub fn detect_identifier_column_with(
    df: &DataFrame,
    options: &DetectionOptions,
) -> Option<ColumnDetection> {
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();

    if let Some(found) = detect_by_keyword(&names) {
        return Some(found);
    }

    df.get_columns()
        .iter()
        .find_map(|col| sample_column(col, options))
}

fn detect_by_keyword(names: &[String]) -> Option<ColumnDetection> {
    let lowered: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
    for group in INDICATOR_GROUPS {
        for keyword in *group {
            if let Some(idx) = lowered.iter().position(|name| name.contains(keyword)) {
                return Some(ColumnDetection {
                    column: names[idx].clone(),
                    method: DetectionMethod::Keyword {
                        keyword: (*keyword).to_string(),
                    },
                });
            }
        }
    }
    None
}

fn sample_column(col: &Column, options: &DetectionOptions) -> Option<ColumnDetection> {
    let sample = match non_null_sample(col, options.sample_size) {
        Ok(sample) => sample,
        Err(err) => {
            debug!(column = %col.name(), error = %err, "skipping column in value sample");
            return None;
        }
    };
    if sample.is_empty() {
        return None;
    }

    let hits = sample
        .iter()
        .filter(|value| is_identifier_like(value))
        .count();
    let ratio = hits as f64 / sample.len() as f64;
    (hits as f64 >= sample.len() as f64 * options.min_identifier_ratio).then(|| ColumnDetection {
        column: col.name().to_string(),
        method: DetectionMethod::ValueSample { ratio },
    })
}

/// At least three characters, some alphanumeric content, and not a plain
/// decimal number.
pub fn is_identifier_like(value: &str) -> bool {
    let value = value.trim();
    value.chars().count() >= MIN_IDENTIFIER_LEN
        && value.chars().any(char::is_alphanumeric)
        && !is_plain_decimal(value)
}

fn is_plain_decimal(value: &str) -> bool {
    let mut digits = value.chars().filter(|c| *c != '.').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: &[(&str, &[Option<&str>])]) -> DataFrame {
        let cols = columns
            .iter()
            .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_sku_keyword_anywhere() {
        let df = frame(&[
            ("Date", &[Some("2024-01-01")]),
            ("Qty", &[Some("1")]),
            ("Product SKU", &[Some("WH001")]),
        ]);
        let found = detect_identifier_column_with(&df, &DetectionOptions::default()).unwrap();
        assert_eq!(found.column, "Product SKU");
        assert_eq!(
            found.method,
            DetectionMethod::Keyword {
                keyword: "sku".to_string()
            }
        );
    }

    #[test]
    fn test_group_priority_beats_column_order() {
        let df = frame(&[
            ("order_id", &[Some("1")]),
            ("item_code", &[Some("A1")]),
        ]);
        assert_eq!(detect_identifier_column(&df).as_deref(), Some("item_code"));
    }

    #[test]
    fn test_keyword_order_within_group() {
        // "product_code" precedes "item_id" in the group, whatever the column order.
        let df = frame(&[("item_id", &[Some("1")]), ("product_code", &[Some("2")])]);
        assert_eq!(detect_identifier_column(&df).as_deref(), Some("product_code"));
    }

    #[test]
    fn test_value_sample_phase() {
        let df = frame(&[
            ("qty", &[Some("1"), Some("2"), Some("3")]),
            ("price", &[Some("10.5"), Some("99.99"), Some("1.25")]),
            ("ref", &[Some("X0024AAU4D"), Some("WH001"), Some("CASE_001")]),
        ]);
        let found = detect_identifier_column_with(&df, &DetectionOptions::default()).unwrap();
        assert_eq!(found.column, "ref");
        assert_eq!(found.method, DetectionMethod::ValueSample { ratio: 1.0 });
    }

    #[test]
    fn test_below_threshold_is_skipped() {
        // Two of three look like identifiers: 0.67 < 0.7.
        let df = frame(&[("ref", &[Some("X0024AAU4D"), Some("WH001"), Some("ab")])]);
        assert_eq!(detect_identifier_column(&df), None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let values: Vec<Option<&str>> = (0..10)
            .map(|i| if i < 7 { Some("WH001") } else { Some("1") })
            .collect();
        let df = frame(&[("ref", values.as_slice())]);
        let found = detect_identifier_column_with(&df, &DetectionOptions::default()).unwrap();
        assert_eq!(found.method, DetectionMethod::ValueSample { ratio: 0.7 });
    }

    #[test]
    fn test_no_detection() {
        let df = frame(&[
            ("qty", &[Some("1"), Some("2")]),
            ("empty", &[None, None]),
        ]);
        assert_eq!(detect_identifier_column(&df), None);
    }

    #[test]
    fn test_identifier_shape() {
        assert!(is_identifier_like("WH001"));
        assert!(is_identifier_like(" abc "));
        assert!(!is_identifier_like("ab"));
        assert!(!is_identifier_like("12.50"));
        assert!(!is_identifier_like("1234"));
        assert!(!is_identifier_like("---"));
        assert!(is_identifier_like("1.2.3a"));
    }
}
