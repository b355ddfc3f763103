//! Utility functions for mapping management.

/// Splits a comma- or newline-separated list of SKU variants.
///
/// Entries are trimmed and blank entries dropped; order is kept.
pub fn parse_variant_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|variant| !variant.is_empty())
        .map(str::to_string)
        .collect()
}
