// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, schema-checked parameter sets for track association.
//!
//! This crate models the configuration fragments of a track reconstruction job: each
//! fragment is an immutable, schema-checked record, records are bound to names in
//! namespaces, and namespaces are composed into composites by an explicit merge.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`ParameterRecord`, `RecordSchema`,
//!   `Namespace`, `CompositeConfiguration`, errors)
//! - **Catalog**: The standard associator, truth-match and propagator records
//! - **Ports**: Trait definitions that define interfaces (`NamespaceSource`, `DocumentParser`)
//! - **Adapters**: Implementations for specific namespace sources (built-in catalog, YAML)
//! - **Service**: The parameter-set service that resolves imports and caches the result
//!
//! # Features
//!
//! - **Schema Checking**: Every record carries every field of its kind with the right type
//! - **Immutability**: Records never change after construction; variants are new records
//! - **Explicit Composition**: Imports are merged in order with a configurable conflict policy
//! - **Multiple Sources**: The built-in catalog and YAML documents, queried by priority
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML document support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use hexpset::prelude::*;
//! use hexpset::catalog::{HitAssociatorConfig, POSITION_ASSOCIATOR_CFF, TRUTH_MATCH_CFI};
//!
//! # fn main() -> Result<()> {
//! let service = DefaultParameterSetService::with_catalog()?;
//!
//! let truth = service.namespace(TRUTH_MATCH_CFI)?;
//! let matcher = truth.get("trackMCMatch").expect("bound in the catalog");
//! assert_eq!(matcher.get_string("associator")?, "TrackAssociatorByHits");
//!
//! let position = service.namespace(POSITION_ASSOCIATOR_CFF)?;
//! assert_eq!(position.len(), 3);
//!
//! let tighter = HitAssociatorConfig {
//!     min_hit_cut: 0.75,
//!     ..HitAssociatorConfig::standard()
//! };
//! assert_eq!(tighter.to_record()?.get_double("MinHitCut")?, 0.75);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod catalog;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        BindingSet, CompositeConfiguration, ConfigError, ConflictPolicy, FieldTable, ImportError,
        InputTag, Namespace, ParameterRecord, ParameterSetService, ParameterType, ParameterValue,
        RecordSchema, Result, SchemaError, SchemaRegistry,
    };
    pub use crate::ports::{DocumentParser, NamespaceSource};
    pub use crate::service::{DefaultParameterSetService, ParameterSetServiceBuilder};

    pub use crate::adapters::BuiltinNamespaces;
    // Re-export adapters based on feature flags
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
