// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities shared by the integration tests.

use hexpset::domain::{ConfigError, Namespace, Result};
use hexpset::ports::NamespaceSource;
use std::io::Write;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
///
/// Output is captured by the test harness and shown only for failing tests.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A mock namespace source for testing.
///
/// This allows tests to easily create a source with predefined namespaces and
/// custom priority.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct MockNamespaceSource {
    name: String,
    priority: u8,
    namespaces: Vec<Namespace>,
    should_fail_reload: bool,
}

#[allow(dead_code)]
impl MockNamespaceSource {
    /// Creates a new mock source with the given name and priority.
    pub fn new(name: impl Into<String>, priority: u8) -> Self {
        Self {
            name: name.into(),
            priority,
            namespaces: Vec::new(),
            should_fail_reload: false,
        }
    }

    /// Adds a namespace to the mock source.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Sets whether reload should fail.
    pub fn with_failing_reload(mut self, should_fail: bool) -> Self {
        self.should_fail_reload = should_fail;
        self
    }
}

impl NamespaceSource for MockNamespaceSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn namespace_names(&self) -> Result<Vec<String>> {
        Ok(self.namespaces.iter().map(|n| n.name().to_string()).collect())
    }

    fn load(&self, name: &str) -> Result<Option<Namespace>> {
        Ok(self.namespaces.iter().find(|n| n.name() == name).cloned())
    }

    fn reload(&mut self) -> Result<()> {
        if self.should_fail_reload {
            Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: "Mock reload failure".to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

/// Creates a temporary YAML file with the given content.
///
/// Returns a NamedTempFile that will be automatically deleted when dropped.
#[allow(dead_code)]
pub fn create_temp_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}
