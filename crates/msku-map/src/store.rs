//! Mapping store: curated MSKU mappings plus the classifier-generated subset.
//!
//! Every mutation takes `&mut self`, so a store has exactly one writer at a
//! time. Callers that share a store across threads wrap it in a lock; batch
//! processing works on a clone and commits it back on success.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use msku_model::{
    CategoryDetail, MappingError, MappingMethod, MappingReport, MasterMapping, Resolution,
    Result, SAMPLE_VARIANT_LIMIT, UNCATEGORIZED_EMPTY, UNCATEGORIZED_UNKNOWN, VariantSet,
};

use crate::classifier::Classifier;

/// Explicit mappings, classifier fallback, and auto-generated bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    master: MasterMapping,
    /// Identifiers that reached the classifier through [`MappingStore::resolve`].
    auto_generated: MasterMapping,
    /// MSKUs created by [`MappingStore::merge_categories`] on this store.
    /// Not persisted: a reloaded seed treats every category as curated.
    classifier_derived: HashSet<String>,
    classifier: Arc<Classifier>,
    /// identifier -> MSKU, first claiming entry wins. Reset on every change to `master`.
    lookup_index: OnceLock<HashMap<String, String>>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with curated mappings.
    pub fn from_mapping(master: MasterMapping) -> Self {
        Self {
            master,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn mapping(&self) -> &MasterMapping {
        &self.master
    }

    /// Copy of the current master mapping, e.g. for persistence.
    pub fn snapshot(&self) -> MasterMapping {
        self.master.clone()
    }

    pub fn auto_generated(&self) -> &MasterMapping {
        &self.auto_generated
    }

    /// True when `msku` was introduced by a classifier pre-pass during this
    /// store's lifetime.
    pub fn is_classifier_derived(&self, msku: &str) -> bool {
        self.classifier_derived.contains(msku)
    }

    pub fn len(&self) -> usize {
        self.master.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    /// Exact lookup against variant lists and MSKU keys.
    pub fn lookup_explicit(&self, identifier: &str) -> Option<&str> {
        self.lookup_index
            .get_or_init(|| build_lookup_index(&self.master))
            .get(identifier)
            .map(String::as_str)
    }

    /// Resolves an identifier to its MSKU.
    ///
    /// Missing and blank identifiers map to the sentinel categories. Anything
    /// else is looked up explicitly first and classified on a miss; classified
    /// identifiers are recorded as auto-generated.
    pub fn resolve(&mut self, identifier: Option<&str>) -> String {
        self.resolve_with_method(identifier).msku
    }

    /// Like [`MappingStore::resolve`], also reporting how the MSKU was found.
    pub fn resolve_with_method(&mut self, identifier: Option<&str>) -> Resolution {
        let Some(raw) = identifier else {
            return auto(UNCATEGORIZED_UNKNOWN.to_string());
        };
        let sku = raw.trim();
        if sku.is_empty() {
            return auto(UNCATEGORIZED_EMPTY.to_string());
        }

        if let Some(msku) = self.lookup_explicit(sku) {
            let method = if self.is_classifier_derived(msku) {
                MappingMethod::IntelligentAuto
            } else {
                MappingMethod::Explicit
            };
            return Resolution {
                msku: msku.to_string(),
                method,
            };
        }

        let category = self.classifier.classify(sku);
        self.auto_generated
            .variants_mut(&category)
            .insert(sku.to_string());
        auto(category)
    }

    /// Adds classifier groupings (category -> identifiers) to the master mapping.
    ///
    /// Variants are deduplicated per category, so merging the same groups twice
    /// is a no-op. Returns the number of variants added.
    pub fn merge_categories(&mut self, groups: &MasterMapping) -> usize {
        let mut added = 0usize;
        let mut created = false;
        for (category, identifiers) in groups.iter() {
            if !self.master.contains(category) {
                self.classifier_derived.insert(category.to_string());
                created = true;
            }
            let variants = self.master.variants_mut(category);
            for identifier in identifiers {
                if variants.insert(identifier.clone()) {
                    added += 1;
                }
            }
        }
        if added > 0 || created {
            self.invalidate_index();
        }
        added
    }

    /// Store-level report: category counts and up to three sample variants each.
    pub fn summary(&self) -> MappingReport {
        let total = self.master.len();
        let auto_generated = self.auto_generated.len();
        let categories = self
            .master
            .iter()
            .map(|(msku, variants)| CategoryDetail {
                msku: msku.to_string(),
                variant_count: variants.len(),
                sample_variants: variants.iter().take(SAMPLE_VARIANT_LIMIT).cloned().collect(),
                is_auto_generated: self.auto_generated.contains(msku),
            })
            .collect();
        MappingReport {
            total_categories: total,
            auto_generated_categories: auto_generated,
            predefined_categories: total.saturating_sub(auto_generated),
            categories,
        }
    }

    /// Sets the curated variants of `msku`, replacing any existing list.
    pub fn set_mapping<I, S>(&mut self, msku: &str, variants: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let msku = msku.trim();
        if msku.is_empty() {
            return Err(MappingError::EmptyMsku);
        }
        let variants: VariantSet = variants
            .into_iter()
            .map(|variant| variant.as_ref().trim().to_string())
            .filter(|variant| !variant.is_empty())
            .collect();
        if variants.is_empty() {
            return Err(MappingError::NoVariants {
                msku: msku.to_string(),
            });
        }
        self.master.insert(msku, variants);
        self.classifier_derived.remove(msku);
        self.invalidate_index();
        Ok(())
    }

    /// Adds one variant to `msku`, creating the mapping if needed.
    ///
    /// Returns `false` when the variant was already listed.
    pub fn add_variant(&mut self, msku: &str, variant: &str) -> Result<bool> {
        let msku = msku.trim();
        let variant = variant.trim();
        if msku.is_empty() {
            return Err(MappingError::EmptyMsku);
        }
        if variant.is_empty() {
            return Err(MappingError::NoVariants {
                msku: msku.to_string(),
            });
        }
        if !self.master.variants_mut(msku).insert(variant.to_string()) {
            return Ok(false);
        }
        self.invalidate_index();
        Ok(true)
    }

    pub fn remove_variant(&mut self, msku: &str, variant: &str) -> Result<()> {
        let variants = self
            .master
            .get_mut(msku)
            .ok_or_else(|| MappingError::UnknownMsku(msku.to_string()))?;
        if !variants.shift_remove(variant) {
            return Err(MappingError::VariantNotFound {
                msku: msku.to_string(),
                variant: variant.to_string(),
            });
        }
        self.invalidate_index();
        Ok(())
    }

    /// Removes an MSKU and its variants.
    pub fn remove_mapping(&mut self, msku: &str) -> Result<VariantSet> {
        let removed = self
            .master
            .remove(msku)
            .ok_or_else(|| MappingError::UnknownMsku(msku.to_string()))?;
        self.classifier_derived.remove(msku);
        self.invalidate_index();
        Ok(removed)
    }

    /// Drops every mapping, keeping the classifier.
    pub fn clear(&mut self) {
        self.master.clear();
        self.auto_generated.clear();
        self.classifier_derived.clear();
        self.invalidate_index();
    }

    fn invalidate_index(&mut self) {
        self.lookup_index.take();
    }
}

fn auto(msku: String) -> Resolution {
    Resolution {
        msku,
        method: MappingMethod::IntelligentAuto,
    }
}

fn build_lookup_index(master: &MasterMapping) -> HashMap<String, String> {
    let mut index: HashMap<String, String> = HashMap::new();
    for (msku, variants) in master.iter() {
        index
            .entry(msku.to_string())
            .or_insert_with(|| msku.to_string());
        for variant in variants {
            index
                .entry(variant.clone())
                .or_insert_with(|| msku.to_string());
        }
    }
    index
}
