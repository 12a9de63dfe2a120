// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) through which the service reaches
//! the outside world: where namespaces come from and how documents are read. These
//! traits are implemented by adapters in the adapters layer.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::DocumentParser;
pub use source::NamespaceSource;
