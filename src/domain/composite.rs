// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composite configurations built by explicit merge.
//!
//! A [`CompositeConfiguration`] is the union of the bindings of an ordered list of
//! sources. It is a plain immutable value: there is no shared symbol table and merging
//! never mutates its inputs.
//!
//! # Merge rules
//!
//! - A source whose name was already merged is skipped.
//! - A binding whose name is already present with an equal record is skipped.
//! - A binding whose name is already present with a different record is resolved by
//!   the [`ConflictPolicy`].

use crate::domain::errors::ImportError;
use crate::domain::namespace::{Binding, BindingSet, Namespace};
use crate::domain::record::ParameterRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// How to resolve two sources binding the same name to different records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail with [`ImportError::ConflictingBinding`].
    #[default]
    Reject,
    /// Keep the binding from the later source, in the position of the earlier one.
    LastWins,
}

/// The merged bindings of several sources.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::{Chi2AssociatorConfig, HitAssociatorConfig};
/// use hexpset::domain::{CompositeConfiguration, ConflictPolicy, Namespace};
///
/// let hits = Namespace::new("hits_cfi")
///     .bind("hits", HitAssociatorConfig::standard().to_record().unwrap())
///     .unwrap();
/// let chi2 = Namespace::new("chi2_cfi")
///     .bind("chi2", Chi2AssociatorConfig::standard().to_record().unwrap())
///     .unwrap();
///
/// let composite =
///     CompositeConfiguration::merge("both_cff", &[&hits, &chi2], ConflictPolicy::Reject).unwrap();
/// assert_eq!(composite.len(), 2);
/// assert_eq!(composite.origin_of("chi2"), Some("chi2_cfi"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeConfiguration {
    name: String,
    sources: Vec<String>,
    bindings: Vec<Binding>,
}

impl CompositeConfiguration {
    /// Merges the bindings of `sources`, in order, into a new composite named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::ConflictingBinding`] under [`ConflictPolicy::Reject`] when
    /// two sources bind the same name to different records.
    pub fn merge(
        name: impl Into<String>,
        sources: &[&dyn BindingSet],
        policy: ConflictPolicy,
    ) -> Result<Self, ImportError> {
        let name = name.into();
        let mut merged_sources: Vec<String> = Vec::new();
        let mut bindings: Vec<Binding> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for source in sources {
            if merged_sources.iter().any(|s| s == source.name()) {
                tracing::debug!(
                    "Namespace '{}' already imported into '{}', skipping",
                    source.name(),
                    name
                );
                continue;
            }
            merged_sources.push(source.name().to_string());

            for binding in source.bindings() {
                match index.get(binding.name()) {
                    None => {
                        index.insert(binding.name().to_string(), bindings.len());
                        bindings.push(binding.clone());
                    }
                    Some(&position) => {
                        let existing = &bindings[position];
                        if Arc::ptr_eq(existing.record(), binding.record())
                            || existing.record() == binding.record()
                        {
                            continue;
                        }
                        match policy {
                            ConflictPolicy::Reject => {
                                return Err(ImportError::ConflictingBinding {
                                    binding: binding.name().to_string(),
                                    previous: existing.origin().to_string(),
                                    incoming: binding.origin().to_string(),
                                });
                            }
                            ConflictPolicy::LastWins => {
                                tracing::warn!(
                                    "Binding '{}' from '{}' replaces the one from '{}' in '{}'",
                                    binding.name(),
                                    binding.origin(),
                                    existing.origin(),
                                    name
                                );
                                bindings[position] = binding.clone();
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            "Composed '{}' from {} namespace(s) with {} binding(s)",
            name,
            merged_sources.len(),
            bindings.len()
        );

        Ok(Self {
            name,
            sources: merged_sources,
            bindings,
        })
    }

    /// Returns the composite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the names of the merged sources, in merge order, each once.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns the merged bindings.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the record bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<ParameterRecord>> {
        self.bindings
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.record())
    }

    /// Returns `true` if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the namespace that declared the binding `name`.
    pub fn origin_of(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.origin())
    }

    /// Returns the bound names in order.
    pub fn binding_names(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.name()).collect()
    }

    /// Finds the record that registers the component named `component`.
    ///
    /// This is how a consumer that names a component by string, such as the
    /// truth-match filter's `associator`, finds the record configuring it. See
    /// [`ParameterRecord::component_name`].
    pub fn resolve_component(&self, component: &str) -> Option<&Arc<ParameterRecord>> {
        self.bindings
            .iter()
            .map(|b| b.record())
            .find(|r| r.component_name() == component)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if the composite has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Flattens the composite into a namespace with no imports.
    pub fn to_namespace(&self) -> Namespace {
        let mut namespace = Namespace::new(self.name.clone());
        for binding in &self.bindings {
            namespace.push_binding(binding.clone());
        }
        namespace
    }
}

impl BindingSet for CompositeConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Chi2AssociatorConfig, HitAssociatorConfig};
    use crate::domain::FieldTable;

    fn hits_ns() -> Namespace {
        Namespace::new("hits_cfi")
            .bind("hits", HitAssociatorConfig::standard().to_record().unwrap())
            .unwrap()
    }

    fn chi2_ns(name: &str, cut: f64) -> Namespace {
        let record = Chi2AssociatorConfig::standard()
            .to_record()
            .unwrap()
            .modified(FieldTable::new().with("chi2cut", cut))
            .unwrap();
        Namespace::new(name).bind("chi2", record).unwrap()
    }

    #[test]
    fn test_union_of_disjoint_sources() {
        let hits = hits_ns();
        let chi2 = chi2_ns("chi2_cfi", 25.0);
        let composite =
            CompositeConfiguration::merge("cff", &[&hits, &chi2], ConflictPolicy::Reject).unwrap();
        assert_eq!(composite.len(), hits.len() + chi2.len());
        assert_eq!(composite.binding_names(), vec!["hits", "chi2"]);
        assert_eq!(
            composite.sources(),
            &["hits_cfi".to_string(), "chi2_cfi".to_string()]
        );
    }

    #[test]
    fn test_disjoint_merge_is_order_independent() {
        let hits = hits_ns();
        let chi2 = chi2_ns("chi2_cfi", 25.0);
        let ab = CompositeConfiguration::merge("cff", &[&hits, &chi2], ConflictPolicy::Reject)
            .unwrap();
        let ba = CompositeConfiguration::merge("cff", &[&chi2, &hits], ConflictPolicy::Reject)
            .unwrap();
        for name in ["hits", "chi2"] {
            assert_eq!(ab.get(name), ba.get(name));
        }
    }

    #[test]
    fn test_double_import_is_idempotent() {
        let hits = hits_ns();
        let once =
            CompositeConfiguration::merge("cff", &[&hits], ConflictPolicy::Reject).unwrap();
        let twice =
            CompositeConfiguration::merge("cff", &[&hits, &hits], ConflictPolicy::Reject).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equal_rebinding_is_noop() {
        let first = chi2_ns("first_cfi", 25.0);
        let second = chi2_ns("second_cfi", 25.0);
        let composite =
            CompositeConfiguration::merge("cff", &[&first, &second], ConflictPolicy::Reject)
                .unwrap();
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.origin_of("chi2"), Some("first_cfi"));
    }

    #[test]
    fn test_conflict_rejected_by_default() {
        let first = chi2_ns("first_cfi", 25.0);
        let second = chi2_ns("second_cfi", 10.0);
        let err = CompositeConfiguration::merge(
            "cff",
            &[&first, &second],
            ConflictPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ImportError::ConflictingBinding {
                binding: "chi2".to_string(),
                previous: "first_cfi".to_string(),
                incoming: "second_cfi".to_string(),
            }
        );
    }

    #[test]
    fn test_conflict_last_wins() {
        let hits = hits_ns();
        let first = chi2_ns("first_cfi", 25.0);
        let second = chi2_ns("second_cfi", 10.0);
        let composite = CompositeConfiguration::merge(
            "cff",
            &[&first, &hits, &second],
            ConflictPolicy::LastWins,
        )
        .unwrap();
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.binding_names(), vec!["chi2", "hits"]);
        assert_eq!(composite.origin_of("chi2"), Some("second_cfi"));
        assert_eq!(
            composite.get("chi2").unwrap().get_double("chi2cut").unwrap(),
            10.0
        );
    }

    #[test]
    fn test_resolve_component_by_name() {
        let hits = hits_ns();
        let chi2 = chi2_ns("chi2_cfi", 25.0);
        let composite =
            CompositeConfiguration::merge("cff", &[&hits, &chi2], ConflictPolicy::Reject).unwrap();
        let record = composite.resolve_component("TrackAssociatorByHits").unwrap();
        assert_eq!(record.plugin(), "TrackAssociatorByHitsESProducer");
        assert!(composite.resolve_component("NoSuchComponent").is_none());
    }

    #[test]
    fn test_composite_of_composites() {
        let hits = hits_ns();
        let chi2 = chi2_ns("chi2_cfi", 25.0);
        let inner =
            CompositeConfiguration::merge("inner_cff", &[&hits], ConflictPolicy::Reject).unwrap();
        let outer =
            CompositeConfiguration::merge("outer_cff", &[&inner, &chi2], ConflictPolicy::Reject)
                .unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer.origin_of("hits"), Some("hits_cfi"));
    }

    #[test]
    fn test_to_namespace_keeps_bindings() {
        let hits = hits_ns();
        let composite =
            CompositeConfiguration::merge("cff", &[&hits], ConflictPolicy::Reject).unwrap();
        let ns = composite.to_namespace();
        assert_eq!(ns.name(), "cff");
        assert!(ns.imports().is_empty());
        assert_eq!(ns.bindings()[0].origin(), "hits_cfi");
    }

    #[test]
    fn test_empty_merge() {
        let composite = CompositeConfiguration::merge("empty", &[], ConflictPolicy::Reject).unwrap();
        assert!(composite.is_empty());
        assert!(composite.sources().is_empty());
    }
}
