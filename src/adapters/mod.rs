// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing namespace source implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer. Each source adapter implements `NamespaceSource` to provide declared
//! namespaces from a specific place.

pub mod builtin;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use builtin::BuiltinNamespaces;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileAdapter, YamlParser};
