// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which turns the text of a
//! parameter-set document into declared namespaces.

use crate::domain::{Namespace, Result, SchemaRegistry};

/// A trait for parsing parameter-set documents.
///
/// Every record in the document names its kind. The parser looks the kind up in the
/// registry and builds the record through its schema, so a parsed namespace holds only
/// checked records.
///
/// # Examples
///
/// ```rust
/// use hexpset::ports::DocumentParser;
/// use hexpset::domain::{Namespace, Result, SchemaRegistry};
///
/// struct NamesOnly;
///
/// impl DocumentParser for NamesOnly {
///     fn parse(&self, content: &str, _schemas: &SchemaRegistry) -> Result<Vec<Namespace>> {
///         Ok(content.lines().map(Namespace::new).collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let parsed = NamesOnly.parse("a_cfi\nb_cfi", &SchemaRegistry::new()).unwrap();
/// assert_eq!(parsed.len(), 2);
/// ```
pub trait DocumentParser {
    /// Parses a document into the namespaces it declares.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ParseError` - the document is malformed
    /// * `ConfigError::Schema` - a record does not match the schema of its kind
    /// * `ConfigError::Import` - a namespace binds the same name twice
    fn parse(&self, content: &str, schemas: &SchemaRegistry) -> Result<Vec<Namespace>>;

    /// Returns the file extensions supported by this parser, without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    struct LineParser;

    impl DocumentParser for LineParser {
        fn parse(&self, content: &str, _schemas: &SchemaRegistry) -> Result<Vec<Namespace>> {
            let mut namespaces: Vec<Namespace> = Vec::new();
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                if namespaces.iter().any(|n| n.name() == line) {
                    return Err(ConfigError::ParseError {
                        message: format!("namespace '{}' declared twice", line),
                        source: None,
                    });
                }
                namespaces.push(Namespace::new(line));
            }
            Ok(namespaces)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let parsed = LineParser
            .parse("a_cfi\n\nb_cfi\n", &SchemaRegistry::new())
            .unwrap();
        let names: Vec<&str> = parsed.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a_cfi", "b_cfi"]);
    }

    #[test]
    fn test_parser_error() {
        let err = LineParser
            .parse("a_cfi\na_cfi", &SchemaRegistry::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_parser_supported_extensions() {
        assert_eq!(LineParser.supported_extensions(), &["test", "tst"]);
    }
}
