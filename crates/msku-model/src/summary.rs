//! Derived reports: per-batch processing summaries and store-level mapping reports.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapping::is_uncategorized;

/// Number of sample variants listed per category in a [`MappingReport`].
pub const SAMPLE_VARIANT_LIMIT: usize = 3;

/// Coarse grouping of category labels for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Brand,
    Pattern,
    Product,
    AutoGenerated,
    Uncategorized,
}

impl CategoryKind {
    /// Classifies a category label by the markers it carries.
    pub fn of(category: &str) -> Self {
        if is_uncategorized(category) {
            Self::Uncategorized
        } else if category.contains("BRAND") {
            Self::Brand
        } else if category.contains("NUMERIC") {
            Self::Pattern
        } else if category.contains("CATEGORY") {
            Self::Product
        } else {
            Self::AutoGenerated
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand-Based",
            Self::Pattern => "Pattern-Based",
            Self::Product => "Product-Based",
            Self::AutoGenerated => "Auto-Generated",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row count for one MSKU within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub msku: String,
    pub count: usize,
    /// Share of all rows, one decimal.
    pub percentage: f64,
    pub kind: CategoryKind,
}

/// Success accounting for one processed batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total_records: usize,
    pub mapped_records: usize,
    pub unmapped_records: usize,
    /// Percentage of mapped rows, one decimal; 0 for an empty batch.
    pub success_rate: f64,
    /// Sorted by count (descending), then MSKU.
    pub categories: Vec<CategoryStat>,
}

impl ProcessingSummary {
    /// Builds a summary from the MSKU assigned to every row.
    pub fn from_mskus<'a, I>(mskus: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for msku in mskus {
            total += 1;
            *counts.entry(msku).or_insert(0) += 1;
        }
        let unmapped: usize = counts
            .iter()
            .filter(|(msku, _)| is_uncategorized(msku))
            .map(|(_, count)| *count)
            .sum();
        let mapped = total - unmapped;

        let mut categories: Vec<CategoryStat> = counts
            .into_iter()
            .map(|(msku, count)| CategoryStat {
                msku: msku.to_string(),
                count,
                percentage: percentage(count, total),
                kind: CategoryKind::of(msku),
            })
            .collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.msku.cmp(&b.msku)));

        Self {
            total_records: total,
            mapped_records: mapped,
            unmapped_records: unmapped,
            success_rate: percentage(mapped, total),
            categories,
        }
    }

    /// The `n` most frequent categories.
    pub fn top_categories(&self, n: usize) -> &[CategoryStat] {
        &self.categories[..n.min(self.categories.len())]
    }

    pub fn category(&self, msku: &str) -> Option<&CategoryStat> {
        self.categories.iter().find(|stat| stat.msku == msku)
    }
}

/// `part / total * 100`, rounded to one decimal; 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Store-level description of one MSKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub msku: String,
    pub variant_count: usize,
    pub sample_variants: Vec<String>,
    pub is_auto_generated: bool,
}

/// Snapshot of the mapping store contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingReport {
    pub total_categories: usize,
    pub auto_generated_categories: usize,
    pub predefined_categories: usize,
    /// In store order.
    pub categories: Vec<CategoryDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_of_ten_is_seventy_percent() {
        let mut mskus = vec!["SHORT_PRODUCT_CODES"; 7];
        mskus.extend(["UNCATEGORIZED_EMPTY", "UNCATEGORIZED_UNKNOWN", "UNCATEGORIZED_EMPTY"]);
        let summary = ProcessingSummary::from_mskus(mskus);
        assert_eq!(summary.total_records, 10);
        assert_eq!(summary.mapped_records, 7);
        assert_eq!(summary.unmapped_records, 3);
        assert_eq!(summary.success_rate, 70.0);
    }

    #[test]
    fn empty_batch_reports_zero() {
        let summary = ProcessingSummary::from_mskus(Vec::<&str>::new());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn categories_sorted_by_count_then_name() {
        let summary = ProcessingSummary::from_mskus(["B", "A", "C", "C", "A", "C"]);
        let order: Vec<&str> = summary.categories.iter().map(|c| c.msku.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(summary.top_categories(2).len(), 2);
        assert_eq!(summary.top_categories(10).len(), 3);
        assert_eq!(summary.category("C").map(|c| c.percentage), Some(50.0));
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn category_kinds() {
        assert_eq!(CategoryKind::of("DRAGON_BRAND_PRODUCTS"), CategoryKind::Brand);
        assert_eq!(CategoryKind::of("NUMERIC_ORDER_TYPE_999"), CategoryKind::Pattern);
        assert_eq!(CategoryKind::of("SUNGLASSES_CATEGORY"), CategoryKind::Product);
        assert_eq!(CategoryKind::of("SHORT_PRODUCT_CODES"), CategoryKind::AutoGenerated);
        assert_eq!(CategoryKind::of("UNCATEGORIZED_EMPTY"), CategoryKind::Uncategorized);
    }
}
