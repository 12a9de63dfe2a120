// SPDX-License-Identifier: MIT OR Apache-2.0

//! The global tracking geometry service. It takes no parameters.

use crate::domain::{ComponentCategory, FieldTable, ParameterRecord, RecordSchema, SchemaError};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Record kind of the geometry service.
pub const KIND: &str = "GlobalTrackingGeometry";

/// Host plugin type of the geometry service.
pub const PLUGIN: &str = "GlobalTrackingGeometryESProducer";

static SCHEMA: Lazy<Arc<RecordSchema>> =
    Lazy::new(|| Arc::new(RecordSchema::new(KIND, PLUGIN, ComponentCategory::EsProducer)));

/// Returns the schema of the geometry record.
pub fn schema() -> &'static Arc<RecordSchema> {
    &SCHEMA
}

/// Builds the geometry record.
pub fn record() -> Result<ParameterRecord, SchemaError> {
    ParameterRecord::new(schema(), FieldTable::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_has_no_fields() {
        let record = record().unwrap();
        assert!(record.is_empty());
        assert_eq!(record.component_name(), KIND);
        assert_eq!(record.to_string(), "ESProducer(\"GlobalTrackingGeometryESProducer\")");
    }
}
