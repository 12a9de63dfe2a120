// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter name newtype.
//!
//! Field names in a record are compared case-sensitively and exactly as written by the
//! consuming component (`MinHitCut`, `ROUList`, `trackingParticles`, ...).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The name of one field in a parameter record.
///
/// # Examples
///
/// ```
/// use hexpset::domain::ParameterName;
///
/// let name = ParameterName::from("MinHitCut");
/// assert_eq!(name.as_str(), "MinHitCut");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterName(String);

impl ParameterName {
    /// Creates a new `ParameterName` from a `String`.
    pub fn new(name: String) -> Self {
        ParameterName(name)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the name into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ParameterName {
    fn from(s: String) -> Self {
        ParameterName(s)
    }
}

impl From<&str> for ParameterName {
    fn from(s: &str) -> Self {
        ParameterName(s.to_string())
    }
}

impl From<ParameterName> for String {
    fn from(name: ParameterName) -> Self {
        name.0
    }
}

impl AsRef<str> for ParameterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ParameterName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
