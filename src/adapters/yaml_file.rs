// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML parameter-set document adapter.
//!
//! This module provides a parser for parameter-set documents written in YAML and an
//! adapter that serves the namespaces of one such file.
//!
//! # Document format
//!
//! ```yaml
//! namespaces:
//!   - name: My.Package.myAssociator_cfi
//!     imports: [Geometry.CommonDetUnit.globalTrackingGeometry_cfi]
//!     records:
//!       myAssociator:
//!         kind: TrackAssociatorByChi2
//!         parameters:
//!           chi2cut: !double 25.0
//!           onlyDiagonal: !bool false
//! ```
//!
//! Values carry a YAML tag naming their type: `!bool`, `!double`, `!string`, `!vstring`
//! or `!input_tag`. Input tags are written in their textual form,
//! `label[:instance[:process]]`.

use crate::domain::{ConfigError, FieldTable, Namespace, ParameterRecord, Result, SchemaRegistry};
use crate::ports::{DocumentParser, NamespaceSource};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML parameter-set files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    namespaces: Vec<NamespaceDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamespaceDocument {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    imports: Vec<String>,
    #[serde(default, skip_serializing_if = "RecordsDocument::is_empty")]
    records: RecordsDocument,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDocument {
    kind: String,
    #[serde(default)]
    parameters: FieldTable,
}

/// Bindings of one namespace, in document order.
#[derive(Debug, Default)]
struct RecordsDocument(Vec<(String, RecordDocument)>);

impl RecordsDocument {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RecordsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in &self.0 {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

struct RecordsVisitor;

impl<'de> Visitor<'de> for RecordsVisitor {
    type Value = RecordsDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of binding names to records")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        while let Some((name, record)) = access.next_entry::<String, RecordDocument>()? {
            if !seen.insert(name.clone()) {
                return Err(serde::de::Error::custom(format!(
                    "binding '{}' is declared more than once",
                    name
                )));
            }
            records.push((name, record));
        }
        Ok(RecordsDocument(records))
    }
}

impl<'de> Deserialize<'de> for RecordsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RecordsVisitor)
    }
}

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use hexpset::adapters::YamlParser;
/// use hexpset::domain::SchemaRegistry;
/// use hexpset::ports::DocumentParser;
///
/// let yaml = r#"
/// namespaces:
///   - name: Tight.Chi2_cfi
///     records:
///       tightChi2:
///         kind: TrackAssociatorByChi2
///         parameters:
///           chi2cut: !double 10.0
///           onlyDiagonal: !bool true
/// "#;
/// let namespaces = YamlParser::new().parse(yaml, &SchemaRegistry::standard()).unwrap();
/// let record = namespaces[0].get("tightChi2").unwrap();
/// assert_eq!(record.get_double("chi2cut").unwrap(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Writes namespaces as a YAML document that this parser reads back.
    ///
    /// Only the bindings declared by each namespace are written, under the namespace
    /// that is being rendered.
    pub fn render(&self, namespaces: &[Namespace]) -> Result<String> {
        let document = Document {
            namespaces: namespaces
                .iter()
                .map(|ns| NamespaceDocument {
                    name: ns.name().to_string(),
                    imports: ns.imports().to_vec(),
                    records: RecordsDocument(
                        ns.bindings()
                            .iter()
                            .map(|b| {
                                let record = RecordDocument {
                                    kind: b.record().kind().to_string(),
                                    parameters: b.record().to_field_table(),
                                };
                                (b.name().to_string(), record)
                            })
                            .collect(),
                    ),
                })
                .collect(),
        };
        serde_yaml::to_string(&document).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to render YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for YamlParser {
    fn parse(&self, content: &str, schemas: &SchemaRegistry) -> Result<Vec<Namespace>> {
        let document: Document =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut names = HashSet::new();
        let mut namespaces = Vec::with_capacity(document.namespaces.len());
        for declared in document.namespaces {
            if !names.insert(declared.name.clone()) {
                return Err(ConfigError::ParseError {
                    message: format!("Namespace '{}' is declared more than once", declared.name),
                    source: None,
                });
            }

            let mut namespace = declared
                .imports
                .into_iter()
                .fold(Namespace::new(declared.name), |ns, import| ns.with_import(import));
            for (binding, record) in declared.records.0 {
                let schema = schemas.get(&record.kind)?;
                let record = ParameterRecord::new(&schema, record.parameters)?;
                namespace = namespace.bind(binding, record)?;
            }
            namespaces.push(namespace);
        }
        Ok(namespaces)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Namespace source adapter for YAML files.
///
/// # Priority
///
/// YAML files have a priority of 1 by default, which means they override the built-in
/// catalog (priority 0).
///
/// # Examples
///
/// ```rust,no_run
/// use hexpset::adapters::YamlFileAdapter;
/// use hexpset::ports::NamespaceSource;
///
/// let adapter = YamlFileAdapter::from_file("/path/to/associators.yaml").unwrap();
/// for name in adapter.namespace_names().unwrap() {
///     println!("{}", name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Parsed namespaces
    namespaces: Vec<Namespace>,
    /// Schemas records are checked against
    schemas: SchemaRegistry,
    /// YAML parser
    parser: YamlParser,
    priority: u8,
}

impl YamlFileAdapter {
    /// Creates a new YAML file adapter, checking records against the standard schemas.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_schemas(path, SchemaRegistry::standard())
    }

    /// Creates a new YAML file adapter that checks records against `schemas`.
    pub fn with_schemas<P: AsRef<Path>>(path: P, schemas: SchemaRegistry) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let parser = YamlParser::new();

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(&file_path)),
            source: Some(Box::new(e)),
        })?;

        let content = read_document(&canonical_path)?;
        let namespaces = parser.parse(&content, &schemas)?;
        tracing::debug!(
            "Loaded {} namespace(s) from {}",
            namespaces.len(),
            display_name(&canonical_path)
        );

        Ok(Self {
            file_path: canonical_path,
            namespaces,
            schemas,
            parser,
            priority: 1,
        })
    }

    /// Sets the priority of this source.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the path to the document.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl NamespaceSource for YamlFileAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn namespace_names(&self) -> Result<Vec<String>> {
        Ok(self
            .namespaces
            .iter()
            .map(|ns| ns.name().to_string())
            .collect())
    }

    fn load(&self, name: &str) -> Result<Option<Namespace>> {
        Ok(self.namespaces.iter().find(|ns| ns.name() == name).cloned())
    }

    fn reload(&mut self) -> Result<()> {
        let content = read_document(&self.file_path)?;
        self.namespaces = self.parser.parse(&content, &self.schemas)?;
        Ok(())
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn read_document(path: &Path) -> Result<String> {
    // Check file size before reading to prevent DoS via large files
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read file metadata: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Parameter-set file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read parameter-set file: {}", display_name(path)),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::domain::{InputTag, ParameterType, SchemaError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHI2_DOC: &str = r#"
namespaces:
  - name: Tight.Chi2_cfi
    imports: [Geometry.CommonDetUnit.globalTrackingGeometry_cfi]
    records:
      tightChi2:
        kind: TrackAssociatorByChi2
        parameters:
          onlyDiagonal: !bool true
          chi2cut: !double 10.0
"#;

    fn parse(yaml: &str) -> Result<Vec<Namespace>> {
        YamlParser::new().parse(yaml, &SchemaRegistry::standard())
    }

    #[test]
    fn test_yaml_parser_namespace() {
        let namespaces = parse(CHI2_DOC).unwrap();
        assert_eq!(namespaces.len(), 1);
        let ns = &namespaces[0];
        assert_eq!(ns.name(), "Tight.Chi2_cfi");
        assert_eq!(
            ns.imports(),
            &["Geometry.CommonDetUnit.globalTrackingGeometry_cfi".to_string()]
        );
        let record = ns.get("tightChi2").unwrap();
        assert_eq!(record.get_double("chi2cut").unwrap(), 10.0);
        assert!(record.get_bool("onlyDiagonal").unwrap());
    }

    #[test]
    fn test_yaml_parser_all_value_types() {
        let yaml = r#"
namespaces:
  - name: Custom.trackMCMatch_cfi
    records:
      myMatch:
        kind: MCTrackMatcher
        parameters:
          trackingParticles: !input_tag "mergedtruth:MergedTrackTruth"
          tracks: !input_tag ctfWithMaterialTracks
          genParticles: !input_tag "genParticles::HLT"
          associator: !string TrackAssociatorByChi2
"#;
        let namespaces = parse(yaml).unwrap();
        let record = namespaces[0].get("myMatch").unwrap();
        assert_eq!(
            record.get_input_tag("trackingParticles").unwrap(),
            &InputTag::with_instance("mergedtruth", "MergedTrackTruth").unwrap()
        );
        assert_eq!(record.get_input_tag("genParticles").unwrap().process(), "HLT");
        assert_eq!(record.get_string("associator").unwrap(), "TrackAssociatorByChi2");
    }

    #[test]
    fn test_yaml_parser_unknown_kind() {
        let yaml = r#"
namespaces:
  - name: Odd_cfi
    records:
      odd:
        kind: NoSuchProducer
"#;
        let err = parse(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema(SchemaError::UnknownKind { ref kind }) if kind == "NoSuchProducer"
        ));
    }

    #[test]
    fn test_yaml_parser_missing_field() {
        let yaml = r#"
namespaces:
  - name: Half.Chi2_cfi
    records:
      halfChi2:
        kind: TrackAssociatorByChi2
        parameters:
          chi2cut: !double 10.0
"#;
        let err = parse(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Record kind 'TrackAssociatorByChi2' is missing required field 'onlyDiagonal'"
        );
    }

    #[test]
    fn test_yaml_parser_type_mismatch() {
        let yaml = r#"
namespaces:
  - name: Bad.Chi2_cfi
    records:
      badChi2:
        kind: TrackAssociatorByChi2
        parameters:
          chi2cut: !string "10"
          onlyDiagonal: !bool false
"#;
        let err = parse(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema(SchemaError::TypeMismatch {
                expected: ParameterType::Double,
                found: ParameterType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_yaml_parser_bad_input_tag() {
        let yaml = r#"
namespaces:
  - name: Bad.trackMCMatch_cfi
    records:
      badMatch:
        kind: MCTrackMatcher
        parameters:
          trackingParticles: !input_tag ":MergedTrackTruth"
          tracks: !input_tag generalTracks
          genParticles: !input_tag genParticles
          associator: !string TrackAssociatorByHits
"#;
        assert!(matches!(
            parse(yaml).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
    }

    #[test]
    fn test_yaml_parser_duplicate_parameter() {
        let yaml = r#"
namespaces:
  - name: Dup.Chi2_cfi
    records:
      dupChi2:
        kind: TrackAssociatorByChi2
        parameters:
          chi2cut: !double 10.0
          chi2cut: !double 12.0
          onlyDiagonal: !bool false
"#;
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_yaml_parser_duplicate_namespace() {
        let yaml = r#"
namespaces:
  - name: Twice_cff
  - name: Twice_cff
"#;
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("Twice_cff"));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        assert!(parse("invalid: yaml: content:").is_err());
        assert!(parse("namespaces: 3").is_err());
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::new();
        let extensions = parser.supported_extensions();

        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(&"yaml"));
        assert!(extensions.contains(&"yml"));
    }

    #[test]
    fn test_render_round_trip() {
        let parser = YamlParser::new();
        let schemas = SchemaRegistry::standard();
        let catalog = catalog::standard_namespaces().unwrap();

        let rendered = parser.render(&catalog).unwrap();
        let parsed = parser.parse(&rendered, &schemas).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_render_writes_imports_only_when_present() {
        let ns = Namespace::new("Only.Imports_cff").with_import("A_cfi");
        let rendered = YamlParser::new().render(&[ns]).unwrap();
        assert!(rendered.contains("imports"));
        assert!(!rendered.contains("records"));
    }

    #[test]
    fn test_yaml_adapter_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", CHI2_DOC).unwrap();

        let adapter = YamlFileAdapter::from_file(temp_file.path()).unwrap();

        assert_eq!(adapter.name(), "yaml-file");
        assert_eq!(adapter.priority(), 1);
        assert_eq!(adapter.namespace_names().unwrap(), vec!["Tight.Chi2_cfi"]);
        assert!(adapter.load("Tight.Chi2_cfi").unwrap().is_some());
        assert!(adapter.load("Loose.Chi2_cfi").unwrap().is_none());
    }

    #[test]
    fn test_yaml_adapter_with_priority() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", CHI2_DOC).unwrap();

        let adapter = YamlFileAdapter::from_file(temp_file.path())
            .unwrap()
            .with_priority(5);
        assert_eq!(adapter.priority(), 5);
    }

    #[test]
    fn test_yaml_adapter_reload() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        fs::write(&path, CHI2_DOC).unwrap();
        let mut adapter = YamlFileAdapter::from_file(&path).unwrap();
        assert!(adapter.contains("Tight.Chi2_cfi").unwrap());

        fs::write(&path, CHI2_DOC.replace("Tight.Chi2_cfi", "Loose.Chi2_cfi")).unwrap();
        adapter.reload().unwrap();

        assert!(!adapter.contains("Tight.Chi2_cfi").unwrap());
        assert!(adapter.contains("Loose.Chi2_cfi").unwrap());
    }

    #[test]
    fn test_yaml_adapter_reload_keeps_namespaces_on_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        fs::write(&path, CHI2_DOC).unwrap();
        let mut adapter = YamlFileAdapter::from_file(&path).unwrap();

        fs::write(&path, "namespaces: [").unwrap();
        assert!(adapter.reload().is_err());
        assert!(adapter.contains("Tight.Chi2_cfi").unwrap());
    }

    #[test]
    fn test_yaml_adapter_file_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", CHI2_DOC).unwrap();

        let adapter = YamlFileAdapter::from_file(temp_file.path()).unwrap();
        assert_eq!(
            adapter.file_path(),
            temp_file.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_yaml_adapter_nonexistent_file() {
        let result = YamlFileAdapter::from_file("/nonexistent/path/to/associators.yaml");
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
    }

    #[test]
    fn test_yaml_parser_default() {
        let parser = YamlParser::default();
        assert_eq!(parser.supported_extensions().len(), 2);
    }
}
