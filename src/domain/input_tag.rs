// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred references to upstream data products.
//!
//! An [`InputTag`] names the module that produces a collection (the *label*), an
//! optional product instance name and an optional process name. The tag is checked for
//! syntax only; whether the referenced producer exists is decided later by whatever
//! executes the configuration.

use crate::domain::errors::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = ':';

/// A reference to an upstream data collection.
///
/// The textual form is `label[:instance[:process]]`, with trailing empty components
/// left out.
///
/// # Examples
///
/// ```
/// use hexpset::domain::InputTag;
///
/// let tag = InputTag::with_instance("mergedtruth", "MergedTrackTruth").unwrap();
/// assert_eq!(tag.label(), "mergedtruth");
/// assert_eq!(tag.to_string(), "mergedtruth:MergedTrackTruth");
///
/// let tag: InputTag = "generalTracks".parse().unwrap();
/// assert_eq!(tag.instance(), "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InputTag {
    label: String,
    instance: String,
    process: String,
}

impl InputTag {
    /// Creates a tag naming only a producer label.
    pub fn new(label: impl Into<String>) -> Result<Self, SchemaError> {
        Self::with_process(label, "", "")
    }

    /// Creates a tag with a producer label and a product instance name.
    pub fn with_instance(
        label: impl Into<String>,
        instance: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        Self::with_process(label, instance, "")
    }

    /// Creates a tag with all three components.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidInputTag`] if the label is empty or any component
    /// contains a `:`.
    pub fn with_process(
        label: impl Into<String>,
        instance: impl Into<String>,
        process: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let tag = InputTag {
            label: label.into(),
            instance: instance.into(),
            process: process.into(),
        };
        tag.validate()?;
        Ok(tag)
    }

    /// Builds a tag from literals known to be valid.
    pub(crate) fn from_static(label: &'static str, instance: &'static str) -> Self {
        let tag = InputTag {
            label: label.to_string(),
            instance: instance.to_string(),
            process: String::new(),
        };
        debug_assert!(tag.validate().is_ok(), "invalid static input tag {}", tag);
        tag
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.label.is_empty() {
            return Err(self.invalid("producer label is empty"));
        }
        for component in [&self.label, &self.instance, &self.process] {
            if component.contains(SEPARATOR) {
                return Err(self.invalid("component contains ':'"));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> SchemaError {
        SchemaError::InvalidInputTag {
            tag: format!("{}:{}:{}", self.label, self.instance, self.process),
            reason: reason.to_string(),
        }
    }

    /// Returns the producer label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the product instance name, empty when not given.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Returns the process name, empty when not given.
    pub fn process(&self) -> &str {
        &self.process
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, "{}{}", SEPARATOR, self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, "{}{}", SEPARATOR, self.process)?;
        }
        Ok(())
    }
}

impl FromStr for InputTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let parsed = match parts.as_slice() {
            [label] => InputTag::new(*label),
            [label, instance] => InputTag::with_instance(*label, *instance),
            [label, instance, process] => InputTag::with_process(*label, *instance, *process),
            _ => Err(SchemaError::InvalidInputTag {
                tag: s.to_string(),
                reason: "more than three components".to_string(),
            }),
        };
        parsed.map_err(|e| match e {
            SchemaError::InvalidInputTag { reason, .. } => SchemaError::InvalidInputTag {
                tag: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl TryFrom<String> for InputTag {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<InputTag> for String {
    fn from(tag: InputTag) -> Self {
        tag.to_string()
    }
}
