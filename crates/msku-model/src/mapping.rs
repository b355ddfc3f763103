//! Master mapping types.
//!
//! A [`MasterMapping`] groups raw marketplace SKUs under a canonical MSKU.
//! Entry order is significant: lookups scan entries in insertion order and the
//! first canonical key that claims an identifier wins.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Prefix shared by every sentinel category.
pub const UNCATEGORIZED_PREFIX: &str = "UNCATEGORIZED_";
/// Canonical value for a missing identifier.
pub const UNCATEGORIZED_UNKNOWN: &str = "UNCATEGORIZED_UNKNOWN";
/// Canonical value for an identifier that trims to the empty string.
pub const UNCATEGORIZED_EMPTY: &str = "UNCATEGORIZED_EMPTY";

/// Returns true when `msku` belongs to the uncategorized sentinel family.
pub fn is_uncategorized(msku: &str) -> bool {
    msku.starts_with(UNCATEGORIZED_PREFIX)
}

/// How a row's MSKU was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingMethod {
    /// Curated mapping supplied by the caller.
    Explicit,
    /// Category inferred by the pattern classifier.
    IntelligentAuto,
}

impl MappingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::IntelligentAuto => "intelligent_auto",
        }
    }
}

impl fmt::Display for MappingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub msku: String,
    pub method: MappingMethod,
}

/// Variants of one MSKU, deduplicated and in insertion order.
pub type VariantSet = IndexSet<String>;

/// Ordered MSKU -> SKU variants mapping.
///
/// Serialized as a JSON object (`{"MSKU": ["SKU", ...]}`) with entry order
/// preserved in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasterMapping {
    entries: IndexMap<String, VariantSet>,
}

impl MasterMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantSet)> {
        self.entries
            .iter()
            .map(|(msku, variants)| (msku.as_str(), variants))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, msku: &str) -> bool {
        self.entries.contains_key(msku)
    }

    pub fn get(&self, msku: &str) -> Option<&VariantSet> {
        self.entries.get(msku)
    }

    pub fn get_mut(&mut self, msku: &str) -> Option<&mut VariantSet> {
        self.entries.get_mut(msku)
    }

    /// Inserts or replaces the variants for `msku`.
    ///
    /// A replaced entry keeps its position. Returns the previous
    /// variants, if any.
    pub fn insert<I>(&mut self, msku: impl Into<String>, variants: I) -> Option<VariantSet>
    where
        I: IntoIterator<Item = String>,
    {
        self.entries
            .insert(msku.into(), variants.into_iter().collect())
    }

    /// Returns the variants of `msku`, creating an empty entry at the end
    /// when it does not exist yet.
    pub fn variants_mut(&mut self, msku: &str) -> &mut VariantSet {
        self.entries.entry(msku.to_string()).or_default()
    }

    /// Removes `msku`, keeping the order of the remaining entries.
    pub fn remove(&mut self, msku: &str) -> Option<VariantSet> {
        self.entries.shift_remove(msku)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Finds the first MSKU that lists `identifier` as a variant or is equal
    /// to it. Identifiers claimed by several MSKUs resolve to the earliest one.
    pub fn find_canonical(&self, identifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(msku, variants)| *msku == identifier || variants.contains(identifier))
            .map(|(msku, _)| msku.as_str())
    }
}

impl<V> FromIterator<(String, V)> for MasterMapping
where
    V: IntoIterator<Item = String>,
{
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (msku, variants) in iter {
            mapping.insert(msku, variants);
        }
        mapping
    }
}
