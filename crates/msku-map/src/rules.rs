//! Vocabulary consulted by the pattern classifier.
//!
//! The defaults reproduce the built-in marketplace vocabulary. A deployment can
//! swap in its own tables from TOML; any table missing from the file keeps its
//! default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A fixed category label triggered by any of its keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Brand tokens, keyword groups, and electronics prefixes, each checked in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub brands: Vec<String>,
    pub keyword_groups: Vec<KeywordGroup>,
    pub electronics_prefixes: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            brands: ["FUSKED", "DRAGON", "RUDRAV", "CSTE"]
                .into_iter()
                .map(String::from)
                .collect(),
            keyword_groups: vec![
                KeywordGroup::new("SUNGLASSES_CATEGORY", &["SUNGLASS", "GLASSES"]),
                KeywordGroup::new("ENTERTAINMENT_PRODUCTS", &["MUSIC", "HEIST", "SONG"]),
                KeywordGroup::new("APPAREL_ACCESSORIES", &["PACK OF", "FREE SIZE"]),
                KeywordGroup::new("HANDICRAFT_PRODUCTS", &["WOODEN", "CANVAS", "CRAFT"]),
            ],
            electronics_prefixes: ["ST", "MT", "MY"].into_iter().map(String::from).collect(),
        }
    }
}

impl ClassifierRules {
    /// Parses rules from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let rules: Self = toml::from_str(text).context("Failed to parse classifier rules")?;
        Ok(rules)
    }

    /// Loads rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier rules from {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid classifier rules in {}", path.display()))
    }

    /// Uppercases every token and drops blank ones.
    ///
    /// Matching is case-insensitive, and a blank token would match every SKU.
    pub fn normalized(mut self) -> Self {
        self.brands = normalize_tokens(self.brands);
        self.electronics_prefixes = normalize_tokens(self.electronics_prefixes);
        self.keyword_groups = self
            .keyword_groups
            .into_iter()
            .filter_map(|group| {
                let category = group.category.trim().to_string();
                let keywords = normalize_tokens(group.keywords);
                if category.is_empty() || keywords.is_empty() {
                    None
                } else {
                    Some(KeywordGroup { category, keywords })
                }
            })
            .collect();
        self
    }
}

fn normalize_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| token.trim().to_uppercase())
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules = ClassifierRules::from_toml_str(r#"brands = ["acme"]"#).expect("parse rules");
        assert_eq!(rules.brands, vec!["acme"]);
        assert_eq!(rules.keyword_groups, ClassifierRules::default().keyword_groups);
        assert_eq!(rules.electronics_prefixes, vec!["ST", "MT", "MY"]);
    }

    #[test]
    fn keyword_groups_from_toml() {
        let text = r#"
            [[keyword_groups]]
            category = "KITCHEN_PRODUCTS"
            keywords = ["mug", "  ", "kettle"]

            [[keyword_groups]]
            category = "EMPTY_GROUP"
            keywords = []
        "#;
        let rules = ClassifierRules::from_toml_str(text)
            .expect("parse rules")
            .normalized();
        assert_eq!(rules.keyword_groups.len(), 1);
        assert_eq!(rules.keyword_groups[0].keywords, vec!["MUG", "KETTLE"]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(ClassifierRules::from_toml_str("brands = 3").is_err());
    }
}
