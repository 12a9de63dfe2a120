// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chi2 track associator.
//!
//! Matches tracks by comparing their helix parameters, using the track covariance
//! matrix, and keeps pairs whose chi2 is below a cut.

use crate::catalog::{expect_kind, invalid};
use crate::domain::{
    ComponentCategory, FieldTable, ParameterRecord, ParameterType, RecordSchema, SchemaError,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Record kind of the chi2 associator.
pub const KIND: &str = "TrackAssociatorByChi2";

/// Host plugin type of the chi2 associator.
pub const PLUGIN: &str = "TrackAssociatorByChi2ESProducer";

const CHI2_CUT: &str = "chi2cut";
const ONLY_DIAGONAL: &str = "onlyDiagonal";

static SCHEMA: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    Arc::new(
        RecordSchema::new(KIND, PLUGIN, ComponentCategory::EsProducer)
            .with_field(CHI2_CUT, ParameterType::Double)
            .with_field(ONLY_DIAGONAL, ParameterType::Bool),
    )
});

/// Typed view of a chi2 associator record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chi2AssociatorConfig {
    /// Largest chi2 for which two tracks are associated
    pub chi2cut: f64,
    /// Ignore the off-diagonal covariance terms
    pub only_diagonal: bool,
}

impl Chi2AssociatorConfig {
    /// Returns the schema of the chi2 associator record.
    pub fn schema() -> &'static Arc<RecordSchema> {
        &SCHEMA
    }

    /// Returns the standard associator settings.
    pub fn standard() -> Self {
        Self {
            chi2cut: 25.0,
            only_diagonal: false,
        }
    }

    /// Checks that the cut is a finite positive number.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.chi2cut.is_finite() || self.chi2cut <= 0.0 {
            return Err(invalid(
                KIND,
                CHI2_CUT,
                format!("must be a finite positive number, found {}", self.chi2cut),
            ));
        }
        Ok(())
    }

    /// Builds the record for these settings.
    pub fn to_record(&self) -> Result<ParameterRecord, SchemaError> {
        self.validate()?;
        let table = FieldTable::new()
            .with(CHI2_CUT, self.chi2cut)
            .with(ONLY_DIAGONAL, self.only_diagonal);
        ParameterRecord::new(Self::schema(), table)
    }
}

impl TryFrom<&ParameterRecord> for Chi2AssociatorConfig {
    type Error = SchemaError;

    fn try_from(record: &ParameterRecord) -> Result<Self, Self::Error> {
        expect_kind(record, Self::schema())?;
        let config = Self {
            chi2cut: record.get_double(CHI2_CUT)?,
            only_diagonal: record.get_bool(ONLY_DIAGONAL)?,
        };
        config.validate()?;
        Ok(config)
    }
}
