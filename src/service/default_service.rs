// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default parameter-set service implementation.
//!
//! This module provides the default implementation of the `ParameterSetService`
//! trait, which loads namespaces from several sources in priority order, resolves
//! their imports and caches the result.

use crate::adapters::BuiltinNamespaces;
use crate::domain::{
    BindingSet, CompositeConfiguration, ConflictPolicy, ImportError, Namespace,
    ParameterSetService, RecordSchema, Result, SchemaRegistry,
};
use crate::ports::NamespaceSource;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Default implementation of the parameter-set service.
///
/// Sources are queried in priority order (highest first) and the first source that
/// provides a namespace wins. Resolving a namespace resolves its imports first, then
/// merges them, in declaration order, followed by the namespace's own bindings.
///
/// # Examples
///
/// ```rust
/// use hexpset::prelude::*;
/// use hexpset::catalog::{HIT_ASSOCIATOR_CFI, TRUTH_MATCH_CFI};
///
/// # fn main() -> Result<()> {
/// let service = DefaultParameterSetService::with_catalog()?;
/// let composite = service.compose("validation_cff", &[HIT_ASSOCIATOR_CFI, TRUTH_MATCH_CFI])?;
/// assert_eq!(composite.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct DefaultParameterSetService {
    /// List of namespace sources, maintained in priority order (highest first)
    sources: Vec<Box<dyn NamespaceSource>>,
    /// How clashing bindings are resolved
    policy: ConflictPolicy,
    /// Schemas known to the service
    schemas: SchemaRegistry,
    /// Cache of resolved namespaces
    cache: Arc<RwLock<HashMap<String, Arc<CompositeConfiguration>>>>,
}

impl DefaultParameterSetService {
    /// Creates a new service with no sources, the standard schemas and the default
    /// conflict policy.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            policy: ConflictPolicy::default(),
            schemas: SchemaRegistry::standard(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new service builder.
    pub fn builder() -> ParameterSetServiceBuilder {
        ParameterSetServiceBuilder::new()
    }

    /// Creates a service that serves the built-in catalog.
    pub fn with_catalog() -> Result<Self> {
        Self::builder().with_builtin_catalog()?.build()
    }

    /// Adds a namespace source to the service.
    ///
    /// Sources are automatically sorted by priority after being added.
    pub fn add_source(&mut self, source: Box<dyn NamespaceSource>) {
        self.sources.push(source);
        self.sort_sources();
        self.invalidate_cache();
    }

    /// Returns the conflict policy used when merging.
    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Returns the schemas known to the service.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Returns the names of every namespace some source provides, sorted.
    pub fn namespace_names(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for source in &self.sources {
            names.extend(source.namespace_names()?);
        }
        Ok(names.into_iter().collect())
    }

    /// Sorts sources by priority (highest first).
    fn sort_sources(&mut self) {
        self.sources.sort_by_key(|b| std::cmp::Reverse(b.priority()));
    }

    /// Invalidates the cache.
    fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Loads a declared namespace from the highest-priority source that has it.
    fn find_namespace(&self, name: &str) -> Result<Option<Namespace>> {
        for source in &self.sources {
            if let Some(namespace) = source.load(name)? {
                tracing::debug!("Loaded namespace '{}' from source '{}'", name, source.name());
                return Ok(Some(namespace));
            }
        }
        Ok(None)
    }

    fn resolve(&self, name: &str, stack: &mut Vec<String>) -> Result<Arc<CompositeConfiguration>> {
        if let Ok(cache) = self.cache.read() {
            if let Some(resolved) = cache.get(name) {
                tracing::debug!("Namespace '{}' served from cache", name);
                return Ok(Arc::clone(resolved));
            }
        }

        if let Some(start) = stack.iter().position(|n| n == name) {
            let mut chain = stack[start..].to_vec();
            chain.push(name.to_string());
            return Err(ImportError::ImportCycle { chain }.into());
        }

        let declared = self
            .find_namespace(name)?
            .ok_or_else(|| ImportError::UnknownNamespace {
                name: name.to_string(),
            })?;

        stack.push(name.to_string());
        let imports = declared
            .imports()
            .iter()
            .map(|import| self.resolve(import, stack))
            .collect::<Result<Vec<_>>>()?;
        stack.pop();

        let own = declared.without_imports();
        let mut sources: Vec<&dyn BindingSet> = imports
            .iter()
            .map(|c| &**c as &dyn BindingSet)
            .collect();
        sources.push(&own);

        let resolved = Arc::new(CompositeConfiguration::merge(name, &sources, self.policy)?);

        // Readers racing on a cold cache all get whichever value was cached first.
        match self.cache.write() {
            Ok(mut cache) => Ok(Arc::clone(
                cache.entry(name.to_string()).or_insert(resolved),
            )),
            Err(_) => Ok(resolved),
        }
    }
}

impl Default for DefaultParameterSetService {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSetService for DefaultParameterSetService {
    fn namespace(&self, name: &str) -> Result<Arc<CompositeConfiguration>> {
        self.resolve(name, &mut Vec::new())
    }

    fn compose(&self, name: &str, imports: &[&str]) -> Result<CompositeConfiguration> {
        let resolved = imports
            .iter()
            .map(|import| self.namespace(import))
            .collect::<Result<Vec<_>>>()?;
        let sources: Vec<&dyn BindingSet> = resolved
            .iter()
            .map(|c| &**c as &dyn BindingSet)
            .collect();
        Ok(CompositeConfiguration::merge(name, &sources, self.policy)?)
    }

    fn has_namespace(&self, name: &str) -> bool {
        if let Ok(cache) = self.cache.read() {
            if cache.contains_key(name) {
                return true;
            }
        }
        self.sources.iter().any(|source| match source.contains(name) {
            Ok(found) => found,
            Err(e) => {
                // Log the error but continue to next source
                tracing::debug!(
                    "Error querying source '{}' for namespace '{}': {}",
                    source.name(),
                    name,
                    e
                );
                false
            }
        })
    }

    fn reload(&mut self) -> Result<()> {
        // Reload all sources
        for source in &mut self.sources {
            if let Err(e) = source.reload() {
                tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
            }
        }

        // Invalidate cache after reloading
        self.invalidate_cache();

        Ok(())
    }
}

/// Builder for constructing a `DefaultParameterSetService`.
///
/// # Examples
///
/// ```rust
/// use hexpset::domain::ConflictPolicy;
/// use hexpset::service::ParameterSetServiceBuilder;
///
/// # fn main() -> hexpset::domain::Result<()> {
/// let service = ParameterSetServiceBuilder::new()
///     .with_builtin_catalog()?
///     .with_conflict_policy(ConflictPolicy::LastWins)
///     .build()?;
/// assert_eq!(service.conflict_policy(), ConflictPolicy::LastWins);
/// # Ok(())
/// # }
/// ```
pub struct ParameterSetServiceBuilder {
    sources: Vec<Box<dyn NamespaceSource>>,
    policy: ConflictPolicy,
    schemas: SchemaRegistry,
}

impl ParameterSetServiceBuilder {
    /// Creates a new builder with no sources and the standard schemas.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            policy: ConflictPolicy::default(),
            schemas: SchemaRegistry::standard(),
        }
    }

    /// Adds a namespace source.
    pub fn with_source(mut self, source: Box<dyn NamespaceSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds the built-in catalog as a source.
    pub fn with_builtin_catalog(self) -> Result<Self> {
        let catalog = BuiltinNamespaces::new()?;
        Ok(self.with_source(Box::new(catalog)))
    }

    /// Sets how clashing bindings are resolved.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers an extra record schema.
    ///
    /// Documents added afterwards with [`with_yaml_file`](Self::with_yaml_file) may
    /// use the new kind.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ConflictingSchema` if a different schema is already
    /// registered under the same kind.
    pub fn with_schema(mut self, schema: impl Into<Arc<RecordSchema>>) -> Result<Self> {
        self.schemas.register(schema)?;
        Ok(self)
    }

    /// Adds a YAML parameter-set document as a source.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hexpset::service::ParameterSetServiceBuilder;
    ///
    /// # fn main() -> hexpset::domain::Result<()> {
    /// let service = ParameterSetServiceBuilder::new()
    ///     .with_builtin_catalog()?
    ///     .with_yaml_file("/etc/reco/associators.yaml")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileAdapter;
        let adapter = YamlFileAdapter::with_schemas(path, self.schemas.clone())?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Builds the parameter-set service.
    pub fn build(self) -> Result<DefaultParameterSetService> {
        let mut service = DefaultParameterSetService::new();
        service.policy = self.policy;
        service.schemas = self.schemas;

        for source in self.sources {
            service.add_source(source);
        }

        Ok(service)
    }
}

impl Default for ParameterSetServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
