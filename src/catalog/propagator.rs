// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stepping-helix propagator.
//!
//! Several propagators with different directions are registered from the same plugin;
//! they differ only in `ComponentName` and `PropagationDirection`. The position
//! associator finds the one it needs by component name.

use crate::domain::{
    ComponentCategory, FieldTable, ParameterRecord, ParameterType, RecordSchema, SchemaError,
};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Record kind of the propagator.
pub const KIND: &str = "SteppingHelixPropagator";

/// Host plugin type of the propagator.
pub const PLUGIN: &str = "SteppingHelixPropagatorESProducer";

/// Component name of the along-momentum propagator.
pub const ALONG_COMPONENT_NAME: &str = "SteppingHelixPropagatorAlong";

static SCHEMA: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    Arc::new(
        RecordSchema::new(KIND, PLUGIN, ComponentCategory::EsProducer)
            .with_field("ComponentName", ParameterType::String)
            .with_field("PropagationDirection", ParameterType::String)
            .with_field("useInTeslaFromMagField", ParameterType::Bool)
            .with_field("SetVBFPointer", ParameterType::Bool)
            .with_field("VBFName", ParameterType::String)
            .with_field("useMagVolumes", ParameterType::Bool)
            .with_field("useMatVolumes", ParameterType::Bool)
            .with_field("useIsYokeFlag", ParameterType::Bool)
            .with_field("ApplyRadX0Correction", ParameterType::Bool)
            .with_field("AssumeNoMaterial", ParameterType::Bool)
            .with_field("NoErrorPropagation", ParameterType::Bool)
            .with_field("returnTangentPlane", ParameterType::Bool)
            .with_field("sendLogWarning", ParameterType::Bool)
            .with_field("useTuningForL2Speed", ParameterType::Bool)
            .with_field("debug", ParameterType::Bool)
            .with_field("useEndcapShiftsInZ", ParameterType::Bool)
            .with_field("endcapShiftInZPos", ParameterType::Double)
            .with_field("endcapShiftInZNeg", ParameterType::Double),
    )
});

/// Direction in which a propagator steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationDirection {
    /// Along the track momentum
    AlongMomentum,
    /// Against the track momentum
    OppositeToMomentum,
    /// Whichever surface is closer
    AnyDirection,
}

impl PropagationDirection {
    /// Returns the value written in the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropagationDirection::AlongMomentum => "alongMomentum",
            PropagationDirection::OppositeToMomentum => "oppositeToMomentum",
            PropagationDirection::AnyDirection => "anyDirection",
        }
    }
}

impl fmt::Display for PropagationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the schema of the propagator record.
pub fn schema() -> &'static Arc<RecordSchema> {
    &SCHEMA
}

/// Builds a propagator record with the standard settings, registered as
/// `component_name` and stepping in `direction`.
pub fn record(
    component_name: &str,
    direction: PropagationDirection,
) -> Result<ParameterRecord, SchemaError> {
    let table = FieldTable::new()
        .with("ComponentName", component_name)
        .with("PropagationDirection", direction.as_str())
        .with("useInTeslaFromMagField", false)
        .with("SetVBFPointer", false)
        .with("VBFName", "VolumeBasedMagneticField")
        .with("useMagVolumes", true)
        .with("useMatVolumes", true)
        .with("useIsYokeFlag", true)
        .with("ApplyRadX0Correction", true)
        .with("AssumeNoMaterial", false)
        .with("NoErrorPropagation", false)
        .with("returnTangentPlane", true)
        .with("sendLogWarning", false)
        .with("useTuningForL2Speed", false)
        .with("debug", false)
        .with("useEndcapShiftsInZ", false)
        .with("endcapShiftInZPos", 0.0)
        .with("endcapShiftInZNeg", 0.0);
    ParameterRecord::new(schema(), table)
}

/// Builds the along-momentum propagator record.
pub fn along() -> Result<ParameterRecord, SchemaError> {
    record(ALONG_COMPONENT_NAME, PropagationDirection::AlongMomentum)
}
