// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the parameter-set service implementation.
//!
//! This module contains the concrete implementation of the `ParameterSetService`
//! trait, which resolves namespaces from the configured sources.

pub mod default_service;

// Re-export commonly used types
pub use default_service::{DefaultParameterSetService, ParameterSetServiceBuilder};
