// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record schemas and the schema registry.
//!
//! A [`RecordSchema`] declares, for one record kind, which fields exist and what type
//! each one has. Every declared field is required. Records can only be constructed
//! through a schema, see [`ParameterRecord::new`](crate::domain::ParameterRecord::new).

use crate::domain::errors::SchemaError;
use crate::domain::parameter_name::ParameterName;
use crate::domain::parameter_value::ParameterType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The kind of host component a record configures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Produces conditions or services for the event setup
    #[serde(rename = "ESProducer")]
    EsProducer,
    /// Provides records to the event setup
    #[serde(rename = "ESSource")]
    EsSource,
    /// Produces event data
    #[serde(rename = "EDProducer")]
    EdProducer,
    /// Produces event data and may reject events
    #[serde(rename = "EDFilter")]
    EdFilter,
    /// Reads event data
    #[serde(rename = "EDAnalyzer")]
    EdAnalyzer,
}

impl ComponentCategory {
    /// Returns the name the host framework uses for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::EsProducer => "ESProducer",
            ComponentCategory::EsSource => "ESSource",
            ComponentCategory::EdProducer => "EDProducer",
            ComponentCategory::EdFilter => "EDFilter",
            ComponentCategory::EdAnalyzer => "EDAnalyzer",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field: its name and type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    name: ParameterName,
    ty: ParameterType,
}

impl FieldSpec {
    /// Returns the field name.
    pub fn name(&self) -> &ParameterName {
        &self.name
    }

    /// Returns the declared type.
    pub fn parameter_type(&self) -> ParameterType {
        self.ty
    }
}

/// The schema of one record kind.
///
/// # Examples
///
/// ```
/// use hexpset::domain::{ComponentCategory, ParameterType, RecordSchema};
///
/// let schema = RecordSchema::new(
///     "TrackAssociatorByChi2",
///     "TrackAssociatorByChi2ESProducer",
///     ComponentCategory::EsProducer,
/// )
/// .with_field("chi2cut", ParameterType::Double)
/// .with_field("onlyDiagonal", ParameterType::Bool);
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.field_type("chi2cut"), Some(ParameterType::Double));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    kind: String,
    plugin: String,
    category: ComponentCategory,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Creates a schema with no fields.
    ///
    /// `kind` is the name consumers use to look the component up; `plugin` is the
    /// host plugin type that is instantiated for it.
    pub fn new(
        kind: impl Into<String>,
        plugin: impl Into<String>,
        category: ComponentCategory,
    ) -> Self {
        Self {
            kind: kind.into(),
            plugin: plugin.into(),
            category,
            fields: Vec::new(),
        }
    }

    /// Declares a required field.
    ///
    /// Declaring a name twice keeps its first position and the last type.
    pub fn with_field(mut self, name: impl Into<ParameterName>, ty: ParameterType) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.ty = ty,
            None => self.fields.push(FieldSpec { name, ty }),
        }
        self
    }

    /// Returns the record kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the host plugin type.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Returns the component category.
    pub fn category(&self) -> ComponentCategory {
        self.category
    }

    /// Returns the declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the declared type of a field.
    pub fn field_type(&self, name: &str) -> Option<ParameterType> {
        self.position(name).map(|i| self.fields[i].ty)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name.as_str() == name)
    }
}

/// A lookup table from record kind to schema.
///
/// # Examples
///
/// ```
/// use hexpset::domain::SchemaRegistry;
///
/// let registry = SchemaRegistry::standard();
/// let schema = registry.get("TrackAssociatorByHits").unwrap();
/// assert_eq!(schema.plugin(), "TrackAssociatorByHitsESProducer");
/// assert!(registry.get("NoSuchKind").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the schemas of every component in the catalog.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for schema in crate::catalog::standard_schemas() {
            // Catalog kinds are distinct, so registration cannot conflict.
            registry.schemas.insert(schema.kind().to_string(), schema);
        }
        registry
    }

    /// Registers a schema.
    ///
    /// Registering a schema identical to the one already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ConflictingSchema`] if a different schema is registered
    /// under the same kind.
    pub fn register(&mut self, schema: impl Into<Arc<RecordSchema>>) -> Result<(), SchemaError> {
        let schema = schema.into();
        if let Some(existing) = self.schemas.get(schema.kind()) {
            if **existing == *schema {
                return Ok(());
            }
            return Err(SchemaError::ConflictingSchema {
                kind: schema.kind().to_string(),
            });
        }
        tracing::debug!("Registered schema for record kind '{}'", schema.kind());
        self.schemas.insert(schema.kind().to_string(), schema);
        Ok(())
    }

    /// Looks up the schema of a record kind.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownKind`] if no schema is registered for `kind`.
    pub fn get(&self, kind: &str) -> Result<Arc<RecordSchema>, SchemaError> {
        self.schemas
            .get(kind)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownKind {
                kind: kind.to_string(),
            })
    }

    /// Returns `true` if a schema is registered for `kind`.
    pub fn contains(&self, kind: &str) -> bool {
        self.schemas.contains_key(kind)
    }

    /// Returns the registered kinds in sorted order.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
