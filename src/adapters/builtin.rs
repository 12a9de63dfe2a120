// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in namespace source adapter.
//!
//! This module provides an adapter that serves the standard catalog namespaces from
//! memory.

use crate::catalog;
use crate::domain::{Namespace, Result};
use crate::ports::NamespaceSource;

/// Namespace source adapter for the built-in catalog.
///
/// # Priority
///
/// The catalog has priority 0, the lowest, so a document that declares a namespace
/// with a catalog name replaces the catalog version.
///
/// # Examples
///
/// ```rust
/// use hexpset::adapters::BuiltinNamespaces;
/// use hexpset::catalog::HIT_ASSOCIATOR_CFI;
/// use hexpset::ports::NamespaceSource;
///
/// let source = BuiltinNamespaces::new().unwrap();
/// let namespace = source.load(HIT_ASSOCIATOR_CFI).unwrap().unwrap();
/// assert!(namespace.get("TrackAssociatorByHitsESProducer").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct BuiltinNamespaces {
    namespaces: Vec<Namespace>,
}

impl BuiltinNamespaces {
    /// Creates the adapter, building every catalog namespace.
    pub fn new() -> Result<Self> {
        let namespaces = catalog::standard_namespaces()?;
        tracing::debug!("Built {} catalog namespace(s)", namespaces.len());
        Ok(Self { namespaces })
    }
}

impl NamespaceSource for BuiltinNamespaces {
    fn name(&self) -> &str {
        "builtin"
    }

    fn priority(&self) -> u8 {
        0
    }

    fn namespace_names(&self) -> Result<Vec<String>> {
        Ok(self
            .namespaces
            .iter()
            .map(|ns| ns.name().to_string())
            .collect())
    }

    fn load(&self, name: &str) -> Result<Option<Namespace>> {
        Ok(self.namespaces.iter().find(|ns| ns.name() == name).cloned())
    }

    fn reload(&mut self) -> Result<()> {
        // The catalog is compiled in.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{POSITION_ASSOCIATOR_CFF, TRUTH_MATCH_CFI};

    #[test]
    fn test_builtin_names() {
        let source = BuiltinNamespaces::new().unwrap();
        let names = source.namespace_names().unwrap();
        assert_eq!(names.len(), 7);
        assert!(names.iter().any(|n| n == POSITION_ASSOCIATOR_CFF));
    }

    #[test]
    fn test_builtin_load() {
        let source = BuiltinNamespaces::new().unwrap();
        let ns = source.load(TRUTH_MATCH_CFI).unwrap().unwrap();
        let record = ns.get("trackMCMatch").unwrap();
        assert_eq!(record.kind(), "MCTrackMatcher");
        assert!(source.load("Unknown_cfi").unwrap().is_none());
    }

    #[test]
    fn test_builtin_priority_is_lowest() {
        let source = BuiltinNamespaces::new().unwrap();
        assert_eq!(source.priority(), 0);
        assert_eq!(source.name(), "builtin");
    }

    #[test]
    fn test_builtin_reload() {
        let mut source = BuiltinNamespaces::new().unwrap();
        source.reload().unwrap();
        assert!(source.contains(TRUTH_MATCH_CFI).unwrap());
    }
}
