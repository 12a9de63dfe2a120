// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace source trait definition.
//!
//! This module defines the `NamespaceSource` trait, the port through which the service
//! obtains declared namespaces. The built-in catalog, parameter-set documents on disk
//! and test doubles all implement it.

use crate::domain::{Namespace, Result};

/// A trait for namespace sources.
///
/// A source provides declared namespaces by name. It never resolves imports; that is
/// the service's job.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Priority
///
/// When two sources provide a namespace with the same name, the one from the source
/// with the higher priority is used. The built-in catalog has priority 0, so any
/// document source can replace a catalog namespace.
///
/// # Examples
///
/// ```rust
/// use hexpset::ports::NamespaceSource;
/// use hexpset::domain::{Namespace, Result};
///
/// struct EmptySource;
///
/// impl NamespaceSource for EmptySource {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn namespace_names(&self) -> Result<Vec<String>> {
///         Ok(vec![])
///     }
///
///     fn load(&self, _name: &str) -> Result<Option<Namespace>> {
///         Ok(None)
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let source = EmptySource;
/// assert!(source.load("Anything_cfi").unwrap().is_none());
/// assert!(!source.contains("Anything_cfi").unwrap());
/// ```
pub trait NamespaceSource: Send + Sync {
    /// Returns the name of this source, used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the priority of this source. Higher values take precedence.
    fn priority(&self) -> u8;

    /// Returns the names of all namespaces this source provides.
    fn namespace_names(&self) -> Result<Vec<String>>;

    /// Loads a declared namespace.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Namespace))` - The namespace was found
    /// * `Ok(None)` - This source does not provide it
    /// * `Err(ConfigError)` - The source failed
    fn load(&self, name: &str) -> Result<Option<Namespace>>;

    /// Reloads the source from its underlying storage.
    ///
    /// Sources with nothing to reload return `Ok(())`.
    fn reload(&mut self) -> Result<()>;

    /// Returns `true` if this source provides the namespace `name`.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.namespace_names()?.iter().any(|n| n == name))
    }
}
