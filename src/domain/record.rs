// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter records and field tables.
//!
//! A [`FieldTable`] is the loose, ordered `name -> value` form of a record as it is
//! written in source documents. A [`ParameterRecord`] is the checked form: it can only
//! be built through a [`RecordSchema`], and once built it is immutable.

use crate::domain::errors::SchemaError;
use crate::domain::input_tag::InputTag;
use crate::domain::parameter_name::ParameterName;
use crate::domain::parameter_value::{ParameterType, ParameterValue};
use crate::domain::schema::{ComponentCategory, RecordSchema};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The conventional field naming the registration of an event-setup component.
pub const COMPONENT_NAME_FIELD: &str = "ComponentName";

/// An ordered table of field values, not yet checked against a schema.
///
/// The table keeps insertion order and does not reject repeated names itself;
/// [`ParameterRecord::new`] reports them as [`SchemaError::DuplicateField`].
/// Deserializing a table from a document does reject repeated keys.
///
/// # Examples
///
/// ```
/// use hexpset::domain::FieldTable;
///
/// let table = FieldTable::new()
///     .with("chi2cut", 25.0)
///     .with("onlyDiagonal", false);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("chi2cut").and_then(|v| v.as_double()), Some(25.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTable {
    entries: Vec<(ParameterName, ParameterValue)>,
}

impl FieldTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field and returns the table.
    pub fn with(mut self, name: impl Into<ParameterName>, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a field.
    pub fn insert(&mut self, name: impl Into<ParameterName>, value: impl Into<ParameterValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParameterName, &ParameterValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }
}

impl IntoIterator for FieldTable {
    type Item = (ParameterName, ParameterValue);
    type IntoIter = std::vec::IntoIter<(ParameterName, ParameterValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N, V> FromIterator<(N, V)> for FieldTable
where
    N: Into<ParameterName>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut table = FieldTable::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

impl Serialize for FieldTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct FieldTableVisitor;

impl<'de> Visitor<'de> for FieldTableVisitor {
    type Value = FieldTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of parameter names to typed values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = FieldTable::new();
        let mut seen = HashSet::new();
        while let Some((name, value)) = access.next_entry::<ParameterName, ParameterValue>()? {
            if !seen.insert(name.clone()) {
                return Err(serde::de::Error::custom(format!(
                    "parameter '{}' is given more than once",
                    name
                )));
            }
            table.entries.push((name, value));
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for FieldTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldTableVisitor)
    }
}

/// An immutable, schema-checked configuration record for one host component.
///
/// Field values are stored in schema declaration order, so two records built from the
/// same values are equal regardless of the order in which the values were supplied.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use hexpset::domain::{
///     ComponentCategory, FieldTable, ParameterRecord, ParameterType, RecordSchema,
/// };
///
/// let schema = Arc::new(
///     RecordSchema::new("Example", "ExampleProducer", ComponentCategory::EdProducer)
///         .with_field("enabled", ParameterType::Bool),
/// );
/// let record = ParameterRecord::new(&schema, FieldTable::new().with("enabled", true)).unwrap();
/// assert_eq!(record.get_bool("enabled").unwrap(), true);
///
/// // Missing fields are never defaulted.
/// assert!(ParameterRecord::new(&schema, FieldTable::new()).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterRecord {
    schema: Arc<RecordSchema>,
    values: Vec<ParameterValue>,
}

impl ParameterRecord {
    /// Builds a record from a field table.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownField`] if the table has a field the schema does not declare
    /// - [`SchemaError::TypeMismatch`] if a value does not have the declared type
    /// - [`SchemaError::DuplicateField`] if the table names a field twice
    /// - [`SchemaError::MissingField`] if a declared field is absent
    pub fn new(schema: &Arc<RecordSchema>, table: FieldTable) -> Result<Self, SchemaError> {
        let mut slots: Vec<Option<ParameterValue>> = vec![None; schema.len()];

        for (name, value) in table {
            let index = schema
                .position(name.as_str())
                .ok_or_else(|| SchemaError::UnknownField {
                    kind: schema.kind().to_string(),
                    field: name.to_string(),
                })?;
            let expected = schema.fields()[index].parameter_type();
            if value.parameter_type() != expected {
                return Err(SchemaError::TypeMismatch {
                    kind: schema.kind().to_string(),
                    field: name.into_string(),
                    expected,
                    found: value.parameter_type(),
                });
            }
            if slots[index].is_some() {
                return Err(SchemaError::DuplicateField {
                    kind: schema.kind().to_string(),
                    field: name.into_string(),
                });
            }
            slots[index] = Some(value);
        }

        let values = slots
            .into_iter()
            .zip(schema.fields())
            .map(|(slot, spec)| {
                slot.ok_or_else(|| SchemaError::MissingField {
                    kind: schema.kind().to_string(),
                    field: spec.name().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Returns a copy of this record with some fields replaced.
    ///
    /// Overrides go through the same checks as construction: every name must be
    /// declared, types must match and no name may repeat.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] of the first offending override.
    pub fn modified(&self, overrides: FieldTable) -> Result<Self, SchemaError> {
        let mut values = self.values.clone();
        let mut seen = HashSet::new();
        for (name, value) in overrides {
            let index = self
                .schema
                .position(name.as_str())
                .ok_or_else(|| SchemaError::UnknownField {
                    kind: self.kind().to_string(),
                    field: name.to_string(),
                })?;
            let expected = self.schema.fields()[index].parameter_type();
            if value.parameter_type() != expected {
                return Err(SchemaError::TypeMismatch {
                    kind: self.kind().to_string(),
                    field: name.into_string(),
                    expected,
                    found: value.parameter_type(),
                });
            }
            if !seen.insert(index) {
                return Err(SchemaError::DuplicateField {
                    kind: self.kind().to_string(),
                    field: name.into_string(),
                });
            }
            values[index] = value;
        }
        Ok(Self {
            schema: Arc::clone(&self.schema),
            values,
        })
    }

    /// Returns the record kind.
    pub fn kind(&self) -> &str {
        self.schema.kind()
    }

    /// Returns the host plugin type.
    pub fn plugin(&self) -> &str {
        self.schema.plugin()
    }

    /// Returns the component category.
    pub fn category(&self) -> ComponentCategory {
        self.schema.category()
    }

    /// Returns the name under which the configured component is registered.
    ///
    /// This is the `ComponentName` string field when the schema declares one, and the
    /// record kind otherwise.
    pub fn component_name(&self) -> &str {
        self.get_string(COMPONENT_NAME_FIELD)
            .unwrap_or_else(|_| self.kind())
    }

    /// Returns the schema the record was built from.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Iterates over the fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParameterName, &ParameterValue)> {
        self.schema
            .fields()
            .iter()
            .map(|spec| spec.name())
            .zip(self.values.iter())
    }

    /// Converts the record back into a field table in schema order.
    pub fn to_field_table(&self) -> FieldTable {
        self.iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<&ParameterValue, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownField {
            kind: self.kind().to_string(),
            field: name.to_string(),
        })
    }

    fn mismatch(&self, name: &str, expected: ParameterType, found: &ParameterValue) -> SchemaError {
        SchemaError::TypeMismatch {
            kind: self.kind().to_string(),
            field: name.to_string(),
            expected,
            found: found.parameter_type(),
        }
    }

    /// Reads a `bool` field.
    pub fn get_bool(&self, name: &str) -> Result<bool, SchemaError> {
        match self.lookup(name)? {
            ParameterValue::Bool(b) => Ok(*b),
            other => Err(self.mismatch(name, ParameterType::Bool, other)),
        }
    }

    /// Reads a `double` field.
    pub fn get_double(&self, name: &str) -> Result<f64, SchemaError> {
        match self.lookup(name)? {
            ParameterValue::Double(d) => Ok(*d),
            other => Err(self.mismatch(name, ParameterType::Double, other)),
        }
    }

    /// Reads a `string` field.
    pub fn get_string(&self, name: &str) -> Result<&str, SchemaError> {
        match self.lookup(name)? {
            ParameterValue::String(s) => Ok(s),
            other => Err(self.mismatch(name, ParameterType::String, other)),
        }
    }

    /// Reads a `vstring` field.
    pub fn get_vstring(&self, name: &str) -> Result<&[String], SchemaError> {
        match self.lookup(name)? {
            ParameterValue::VString(v) => Ok(v),
            other => Err(self.mismatch(name, ParameterType::VString, other)),
        }
    }

    /// Reads an `input_tag` field.
    pub fn get_input_tag(&self, name: &str) -> Result<&InputTag, SchemaError> {
        match self.lookup(name)? {
            ParameterValue::InputTag(tag) => Ok(tag),
            other => Err(self.mismatch(name, ParameterType::InputTag, other)),
        }
    }
}

impl fmt::Display for ParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\"", self.category(), self.plugin())?;
        for (name, value) in self.iter() {
            write!(f, ", {}={}", name, value)?;
        }
        f.write_str(")")
    }
}
