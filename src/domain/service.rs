// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter-set service trait definition.
//!
//! This module defines the `ParameterSetService` trait, the interface through which a
//! host process obtains resolved namespaces and builds composites from named sources.

use crate::domain::{CompositeConfiguration, Result};
use std::sync::Arc;

/// The main parameter-set service trait.
///
/// # Examples
///
/// ```rust
/// use hexpset::domain::{
///     CompositeConfiguration, ConflictPolicy, ImportError, ParameterSetService, Result,
/// };
/// use std::sync::Arc;
///
/// struct EmptyService;
///
/// impl ParameterSetService for EmptyService {
///     fn namespace(&self, name: &str) -> Result<Arc<CompositeConfiguration>> {
///         Err(ImportError::UnknownNamespace { name: name.to_string() }.into())
///     }
///
///     fn compose(&self, name: &str, imports: &[&str]) -> Result<CompositeConfiguration> {
///         match imports.first() {
///             Some(missing) => Err(ImportError::UnknownNamespace {
///                 name: missing.to_string(),
///             }
///             .into()),
///             None => Ok(CompositeConfiguration::merge(name, &[], ConflictPolicy::Reject)?),
///         }
///     }
///
///     fn has_namespace(&self, _name: &str) -> bool {
///         false
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let service = EmptyService;
/// assert!(service.namespace("Anything_cfi").is_err());
/// assert!(service.compose("empty_cff", &[]).unwrap().is_empty());
/// ```
pub trait ParameterSetService {
    /// Returns the namespace `name` with all of its imports resolved.
    ///
    /// # Errors
    ///
    /// * `ImportError::UnknownNamespace` - no source provides `name` or one of its imports
    /// * `ImportError::ImportCycle` - the imports of `name` form a cycle
    /// * `ImportError::ConflictingBinding` - imports clash under the service's policy
    fn namespace(&self, name: &str) -> Result<Arc<CompositeConfiguration>>;

    /// Builds a composite named `name` from the named source namespaces, in order.
    ///
    /// Naming a source twice is the same as naming it once.
    fn compose(&self, name: &str, imports: &[&str]) -> Result<CompositeConfiguration>;

    /// Returns `true` if some source provides the namespace `name`.
    fn has_namespace(&self, name: &str) -> bool;

    /// Reloads every source and drops resolved namespaces.
    fn reload(&mut self) -> Result<()>;
}
