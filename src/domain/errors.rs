// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the parameter-set crate.
//!
//! Two families of errors can abort configuration construction: [`SchemaError`] for
//! records whose fields do not match their declared schema, and [`ImportError`] for
//! namespace composition that cannot be resolved. Both are wrapped by [`ConfigError`],
//! which also carries parse, source and I/O failures. All errors use `thiserror`.

use crate::domain::parameter_value::ParameterType;
use thiserror::Error;

/// A record did not match the schema of its kind.
///
/// Every variant that concerns a single field names both the record kind and the field,
/// so the caller can report exactly which parameter is wrong.
///
/// # Examples
///
/// ```
/// use hexpset::domain::SchemaError;
///
/// let error = SchemaError::MissingField {
///     kind: "TrackAssociatorByHits".to_string(),
///     field: "MinHitCut".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Record kind 'TrackAssociatorByHits' is missing required field 'MinHitCut'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// No schema is registered for the record kind.
    #[error("Unknown record kind: {kind}")]
    UnknownKind {
        /// The unregistered kind
        kind: String,
    },

    /// A field declared by the schema was not supplied.
    #[error("Record kind '{kind}' is missing required field '{field}'")]
    MissingField {
        /// The record kind
        kind: String,
        /// The missing field
        field: String,
    },

    /// A field was supplied that the schema does not declare.
    #[error("Record kind '{kind}' has no field named '{field}'")]
    UnknownField {
        /// The record kind
        kind: String,
        /// The undeclared field
        field: String,
    },

    /// A field value does not have the declared type.
    #[error("Field '{field}' of record kind '{kind}' expects {expected}, found {found}")]
    TypeMismatch {
        /// The record kind
        kind: String,
        /// The offending field
        field: String,
        /// The declared type
        expected: ParameterType,
        /// The type that was supplied
        found: ParameterType,
    },

    /// The same field was supplied more than once.
    #[error("Field '{field}' of record kind '{kind}' is given more than once")]
    DuplicateField {
        /// The record kind
        kind: String,
        /// The repeated field
        field: String,
    },

    /// An input tag is not syntactically valid.
    #[error("Invalid input tag '{tag}': {reason}")]
    InvalidInputTag {
        /// The tag as written
        tag: String,
        /// Why it was rejected
        reason: String,
    },

    /// A field has the right type but a value its consumer cannot accept.
    #[error("Invalid value for field '{field}' of record kind '{kind}': {reason}")]
    InvalidValue {
        /// The record kind
        kind: String,
        /// The offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A record of one kind was handed to a consumer of another kind.
    #[error("Expected a record of kind '{expected}', found '{found}'")]
    WrongKind {
        /// The kind the consumer reads
        expected: String,
        /// The kind of the record supplied
        found: String,
    },

    /// A different schema is already registered under this kind.
    #[error("A different schema is already registered for record kind '{kind}'")]
    ConflictingSchema {
        /// The record kind
        kind: String,
    },
}

/// Namespace composition could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// No source provides the named namespace.
    #[error("Namespace not found: {name}")]
    UnknownNamespace {
        /// The namespace that was imported
        name: String,
    },

    /// Two imported namespaces bind the same name to different records.
    #[error(
        "Binding '{binding}' from namespace '{incoming}' conflicts with the one imported from '{previous}'"
    )]
    ConflictingBinding {
        /// The binding name
        binding: String,
        /// The namespace that bound it first
        previous: String,
        /// The namespace that tried to rebind it
        incoming: String,
    },

    /// A single namespace declaration binds the same name twice.
    #[error("Namespace '{namespace}' declares binding '{binding}' more than once")]
    DuplicateBinding {
        /// The declaring namespace
        namespace: String,
        /// The repeated binding name
        binding: String,
    },

    /// Namespaces import each other in a cycle.
    #[error("Import cycle: {}", .chain.join(" -> "))]
    ImportCycle {
        /// The namespaces on the cycle, starting and ending with the same name
        chain: Vec<String>,
    },
}

/// The main error type for parameter-set operations.
///
/// # Examples
///
/// ```
/// use hexpset::domain::{ConfigError, ImportError};
///
/// let error: ConfigError = ImportError::UnknownNamespace {
///     name: "Geometry.Missing_cfi".to_string(),
/// }
/// .into();
/// assert_eq!(error.to_string(), "Namespace not found: Geometry.Missing_cfi");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A record failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A namespace import failed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Failed to parse a parameter-set document.
    #[error("Failed to parse parameter set: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A namespace source failed.
    #[error("Namespace source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading a parameter-set document.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for parameter-set operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
