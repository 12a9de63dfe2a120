// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed parameter values.
//!
//! A parameter holds exactly one of five value types. Values never convert between
//! types: a `double` field given a string is a schema error, not a parse attempt.

use crate::domain::input_tag::InputTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// A boolean flag
    Bool,
    /// A 64-bit floating point number
    Double,
    /// A single string
    String,
    /// An ordered list of strings
    #[serde(rename = "vstring")]
    VString,
    /// A reference to an upstream data collection
    InputTag,
}

impl ParameterType {
    /// Returns the name used for this type in parameter-set documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Bool => "bool",
            ParameterType::Double => "double",
            ParameterType::String => "string",
            ParameterType::VString => "vstring",
            ParameterType::InputTag => "input_tag",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter value.
///
/// Serialized values are externally tagged with their type. In YAML documents this is
/// a tag, for example `!double 0.5` or `!input_tag mergedtruth:MergedTrackTruth`.
///
/// # Examples
///
/// ```
/// use hexpset::domain::{ParameterType, ParameterValue};
///
/// let value = ParameterValue::from(0.5);
/// assert_eq!(value.parameter_type(), ParameterType::Double);
/// assert_eq!(value.as_double(), Some(0.5));
/// assert_eq!(value.as_bool(), None);
/// ```
///
/// Doubles compare by bit pattern, so a NaN equals itself and two records built from
/// the same inputs are always equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// A boolean flag
    Bool(bool),
    /// A 64-bit floating point number
    Double(f64),
    /// A single string
    String(String),
    /// An ordered list of strings
    #[serde(rename = "vstring")]
    VString(Vec<String>),
    /// A reference to an upstream data collection
    InputTag(InputTag),
}

impl ParameterValue {
    /// Returns the type of this value.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Bool(_) => ParameterType::Bool,
            ParameterValue::Double(_) => ParameterType::Double,
            ParameterValue::String(_) => ParameterType::String,
            ParameterValue::VString(_) => ParameterType::VString,
            ParameterValue::InputTag(_) => ParameterType::InputTag,
        }
    }

    /// Returns the boolean, if this is a `bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is a `double` value.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParameterValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the string, if this is a `string` value.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list, if this is a `vstring` value.
    pub fn as_vstring(&self) -> Option<&[String]> {
        match self {
            ParameterValue::VString(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the tag, if this is an `input_tag` value.
    pub fn as_input_tag(&self) -> Option<&InputTag> {
        match self {
            ParameterValue::InputTag(t) => Some(t),
            _ => None,
        }
    }
}

impl PartialEq for ParameterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParameterValue::Bool(a), ParameterValue::Bool(b)) => a == b,
            (ParameterValue::Double(a), ParameterValue::Double(b)) => a.to_bits() == b.to_bits(),
            (ParameterValue::String(a), ParameterValue::String(b)) => a == b,
            (ParameterValue::VString(a), ParameterValue::VString(b)) => a == b,
            (ParameterValue::InputTag(a), ParameterValue::InputTag(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        ParameterValue::Bool(b)
    }
}

impl From<f64> for ParameterValue {
    fn from(d: f64) -> Self {
        ParameterValue::Double(d)
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        ParameterValue::String(s)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::String(s.to_string())
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(v: Vec<String>) -> Self {
        ParameterValue::VString(v)
    }
}

impl From<&[&str]> for ParameterValue {
    fn from(v: &[&str]) -> Self {
        ParameterValue::VString(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<InputTag> for ParameterValue {
    fn from(t: InputTag) -> Self {
        ParameterValue::InputTag(t)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Double(d) => write!(f, "{:?}", d),
            ParameterValue::String(s) => write!(f, "'{}'", s),
            ParameterValue::VString(v) => {
                f.write_str("[")?;
                for (i, s) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{}'", s)?;
                }
                f.write_str("]")
            }
            ParameterValue::InputTag(t) => write!(f, "'{}'", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_type_of_each_variant() {
        assert_eq!(ParameterValue::from(true).parameter_type(), ParameterType::Bool);
        assert_eq!(ParameterValue::from(1.0).parameter_type(), ParameterType::Double);
        assert_eq!(ParameterValue::from("sim").parameter_type(), ParameterType::String);
        assert_eq!(
            ParameterValue::from(vec!["a".to_string()]).parameter_type(),
            ParameterType::VString
        );
        let tag = InputTag::new("generalTracks").unwrap();
        assert_eq!(ParameterValue::from(tag).parameter_type(), ParameterType::InputTag);
    }

    #[test]
    fn test_accessors_do_not_coerce() {
        let value = ParameterValue::from("true");
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_string(), Some("true"));

        let value = ParameterValue::from(1.0);
        assert_eq!(value.as_string(), None);
        assert_eq!(value.as_bool(), None);
    }

    #[test]
    fn test_vstring_preserves_order() {
        let list: &[&str] = &["TrackerHitsTIBLowTof", "TrackerHitsTIBHighTof"];
        let value = ParameterValue::from(list);
        let items = value.as_vstring().unwrap();
        assert_eq!(items[0], "TrackerHitsTIBLowTof");
        assert_eq!(items[1], "TrackerHitsTIBHighTof");
    }

    #[test]
    fn test_display() {
        assert_eq!(ParameterValue::from(false).to_string(), "false");
        assert_eq!(ParameterValue::from(0.5).to_string(), "0.5");
        assert_eq!(ParameterValue::from(120.0).to_string(), "120.0");
        assert_eq!(ParameterValue::from("sim").to_string(), "'sim'");
        let list: &[&str] = &["a", "b"];
        assert_eq!(ParameterValue::from(list).to_string(), "['a', 'b']");
        let tag = InputTag::with_instance("mergedtruth", "MergedTrackTruth").unwrap();
        assert_eq!(
            ParameterValue::from(tag).to_string(),
            "'mergedtruth:MergedTrackTruth'"
        );
    }

    #[test]
    fn test_parameter_type_display() {
        assert_eq!(ParameterType::VString.to_string(), "vstring");
        assert_eq!(ParameterType::InputTag.to_string(), "input_tag");
    }
}
