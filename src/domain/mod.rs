// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! This module holds the parameter-set model: typed values, schemas, immutable records,
//! namespaces and the explicit merge that builds composites. It does no I/O and knows
//! nothing about where namespaces come from.

pub mod composite;
pub mod errors;
pub mod input_tag;
pub mod namespace;
pub mod parameter_name;
pub mod parameter_value;
pub mod record;
pub mod schema;
pub mod service;

// Re-export commonly used types
pub use composite::{CompositeConfiguration, ConflictPolicy};
pub use errors::{ConfigError, ImportError, Result, SchemaError};
pub use input_tag::InputTag;
pub use namespace::{Binding, BindingSet, Namespace};
pub use parameter_name::ParameterName;
pub use parameter_value::{ParameterType, ParameterValue};
pub use record::{FieldTable, ParameterRecord};
pub use schema::{ComponentCategory, FieldSpec, RecordSchema, SchemaRegistry};
pub use service::ParameterSetService;
