//! Rule-based SKU pattern classifier.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. brand token substring (case-insensitive)
//! 2. domain keyword substring (case-insensitive)
//! 3. purely numeric identifiers, by digit count
//! 4. uppercase letter prefix followed by digits
//! 5. dense `[A-Z0-9]{8,}` codes with at least one letter
//! 6. UUID-shaped shipment ids
//! 7. long hyphenated system ids
//! 8. short codes (at most 10 characters)
//! 9. everything else
//!
//! Several rules can match the same string (`DRAGON12345678` is both a brand
//! hit and a dense code), so the order is part of the contract.

use std::sync::LazyLock;

use msku_model::MasterMapping;

use crate::rules::ClassifierRules;

const NUMERIC_ORDER_MIN_DIGITS: usize = 15;
const HSN_CODE_DIGITS: usize = 4;
const NUMERIC_PRODUCT_MIN_DIGITS: usize = 8;
const DENSE_CODE_MIN_LEN: usize = 8;
const UUID_LEN: usize = 36;
const UUID_HYPHENS: usize = 4;
const SYSTEM_ID_MIN_LEN: usize = 20;
const SHORT_CODE_MAX_LEN: usize = 10;

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classifies `identifier` with the built-in rule tables.
pub fn classify(identifier: &str) -> String {
    DEFAULT_CLASSIFIER.classify(identifier)
}

/// Pattern classifier over a configurable vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: ClassifierRules,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierRules::default())
    }
}

impl Classifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self {
            rules: rules.normalized(),
        }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Returns the category label for `identifier`.
    ///
    /// Total over all strings; surrounding whitespace is ignored.
    pub fn classify(&self, identifier: &str) -> String {
        let sku = identifier.trim();
        let upper = sku.to_uppercase();

        if let Some(brand) = self
            .rules
            .brands
            .iter()
            .find(|brand| upper.contains(brand.as_str()))
        {
            return format!("{brand}_BRAND_PRODUCTS");
        }

        if let Some(group) = self.rules.keyword_groups.iter().find(|group| {
            group
                .keywords
                .iter()
                .any(|keyword| upper.contains(keyword.as_str()))
        }) {
            return group.category.clone();
        }

        if let Some(category) = numeric_category(sku) {
            return category;
        }

        if let Some(prefix) = letter_prefix_before_digit(sku) {
            return format!("ALPHANUMERIC_TYPE_{prefix}");
        }

        if is_dense_code(sku) {
            return match self
                .rules
                .electronics_prefixes
                .iter()
                .find(|prefix| sku.starts_with(prefix.as_str()))
            {
                Some(prefix) => format!("ELECTRONICS_TYPE_{prefix}"),
                None => "MIXED_ALPHANUMERIC_PRODUCTS".to_string(),
            };
        }

        let len = sku.chars().count();
        let hyphens = sku.matches('-').count();
        if len == UUID_LEN && hyphens == UUID_HYPHENS {
            return "UUID_SHIPMENT_IDS".to_string();
        }
        if len >= SYSTEM_ID_MIN_LEN && hyphens > 0 {
            return "SYSTEM_GENERATED_IDS".to_string();
        }
        if len <= SHORT_CODE_MAX_LEN {
            return if !sku.is_empty() && sku.chars().all(char::is_alphanumeric) {
                "SHORT_PRODUCT_CODES".to_string()
            } else {
                "SHORT_MIXED_CODES".to_string()
            };
        }
        "LONG_IDENTIFIER_CODES".to_string()
    }

    /// Groups unique identifiers by category.
    ///
    /// Blank identifiers are skipped, the rest are trimmed. Categories and the
    /// identifiers inside them keep first-seen order; duplicates are dropped.
    pub fn group_by_category<I, S>(&self, identifiers: I) -> MasterMapping
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups = MasterMapping::new();
        for identifier in identifiers {
            let sku = identifier.as_ref().trim();
            if sku.is_empty() {
                continue;
            }
            let category = self.classify(sku);
            groups.variants_mut(&category).insert(sku.to_string());
        }
        groups
    }
}

/// Rule 3. Lengths not listed fall through to the later rules.
fn numeric_category(sku: &str) -> Option<String> {
    if sku.is_empty() || !sku.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = sku.len();
    if digits >= NUMERIC_ORDER_MIN_DIGITS {
        Some(format!("NUMERIC_ORDER_TYPE_{}", &sku[..3]))
    } else if digits == HSN_CODE_DIGITS {
        Some(format!("HSN_CODE_{sku}"))
    } else if digits >= NUMERIC_PRODUCT_MIN_DIGITS {
        Some(format!("NUMERIC_PRODUCT_TYPE_{}", &sku[..2]))
    } else {
        None
    }
}

/// Rule 4: two or more leading ASCII uppercase letters immediately followed
/// by a digit. Returns the full uppercase run.
fn letter_prefix_before_digit(sku: &str) -> Option<&str> {
    let prefix_len = sku.bytes().take_while(u8::is_ascii_uppercase).count();
    let next_is_digit = sku
        .as_bytes()
        .get(prefix_len)
        .is_some_and(u8::is_ascii_digit);
    (prefix_len >= 2 && next_is_digit).then(|| &sku[..prefix_len])
}

/// Rule 5 shape: `[A-Z0-9]{8,}` containing at least one letter.
fn is_dense_code(sku: &str) -> bool {
    sku.len() >= DENSE_CODE_MIN_LEN
        && sku
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && sku.bytes().any(|b| b.is_ascii_uppercase())
}
