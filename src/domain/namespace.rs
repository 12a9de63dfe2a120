// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespaces: named sets of record bindings.
//!
//! A [`Namespace`] is one declaration unit. It binds names to records and may list
//! other namespaces to import. Imports are resolved by the service layer, never here.

use crate::domain::errors::ImportError;
use crate::domain::record::ParameterRecord;
use std::sync::Arc;

/// A name bound to a shared record.
///
/// The origin is the namespace that declared the binding. It travels with the binding
/// through imports, so a composite can report where each record came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    name: String,
    record: Arc<ParameterRecord>,
    origin: String,
}

impl Binding {
    /// Creates a binding declared by the namespace `origin`.
    pub fn new(
        name: impl Into<String>,
        record: Arc<ParameterRecord>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record,
            origin: origin.into(),
        }
    }

    /// Returns the bound name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bound record.
    pub fn record(&self) -> &Arc<ParameterRecord> {
        &self.record
    }

    /// Returns the name of the declaring namespace.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Anything that exposes a named, ordered list of bindings.
///
/// Both declared namespaces and resolved composites can be merged into a new
/// composite through this trait.
pub trait BindingSet {
    /// Returns the name of the set.
    fn name(&self) -> &str;

    /// Returns the bindings in order.
    fn bindings(&self) -> &[Binding];
}

/// One declaration unit: its imports and its own bindings.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::HitAssociatorConfig;
/// use hexpset::domain::Namespace;
///
/// let record = HitAssociatorConfig::standard().to_record().unwrap();
/// let namespace = Namespace::new("SimTracker.TrackAssociation.TrackAssociatorByHits_cfi")
///     .bind("TrackAssociatorByHitsESProducer", record)
///     .unwrap();
/// assert_eq!(namespace.len(), 1);
/// assert!(namespace.get("TrackAssociatorByHitsESProducer").is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Namespace {
    name: String,
    imports: Vec<String>,
    bindings: Vec<Binding>,
}

impl Namespace {
    /// Creates an empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Adds an import.
    ///
    /// Importing the same namespace twice records it once.
    pub fn with_import(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.imports.contains(&name) {
            self.imports.push(name);
        }
        self
    }

    /// Binds a name to a record declared in this namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::DuplicateBinding`] if the name is already bound here.
    pub fn bind(
        mut self,
        name: impl Into<String>,
        record: impl Into<Arc<ParameterRecord>>,
    ) -> Result<Self, ImportError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ImportError::DuplicateBinding {
                namespace: self.name.clone(),
                binding: name,
            });
        }
        let binding = Binding::new(name, record.into(), self.name.clone());
        self.bindings.push(binding);
        Ok(self)
    }

    /// Returns the namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bindings declared here, in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the declared imports in order.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Returns the record bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<ParameterRecord>> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.record)
    }

    /// Returns the number of bindings declared here.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if the namespace declares no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn push_binding(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Returns a copy of this namespace without its imports.
    pub(crate) fn without_imports(&self) -> Self {
        Self {
            name: self.name.clone(),
            imports: Vec::new(),
            bindings: self.bindings.clone(),
        }
    }
}

impl BindingSet for Namespace {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
