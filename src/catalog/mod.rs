// SPDX-License-Identifier: MIT OR Apache-2.0

//! The standard component catalog.
//!
//! Every component the track-association configuration knows about has a schema and a
//! set of standard values here. The typed views ([`HitAssociatorConfig`],
//! [`TruthMatchConfig`], [`Chi2AssociatorConfig`], [`PositionAssociatorConfig`]) read a
//! [`ParameterRecord`] into a struct and check the constraints the consuming component
//! places on its values. The propagator and geometry records have no typed view; the
//! catalog only needs to construct them.
//!
//! [`standard_namespaces`] returns the declaration units built from these values. They
//! are what [`BuiltinNamespaces`](crate::adapters::BuiltinNamespaces) serves.

pub mod chi2_associator;
pub mod geometry;
pub mod hit_associator;
pub mod position_associator;
pub mod propagator;
pub mod truth_match;

pub use chi2_associator::Chi2AssociatorConfig;
pub use hit_associator::{Denominator, HitAssociatorConfig};
pub use position_associator::{PositionAssociatorConfig, PositionMethod};
pub use propagator::PropagationDirection;
pub use truth_match::TruthMatchConfig;

use crate::domain::{Namespace, ParameterRecord, RecordSchema, Result, SchemaError};
use std::sync::Arc;

/// Declares the hit-based associator.
pub const HIT_ASSOCIATOR_CFI: &str = "SimTracker.TrackAssociation.TrackAssociatorByHits_cfi";
/// Declares the truth-match filter.
pub const TRUTH_MATCH_CFI: &str = "SimTracker.TrackAssociation.trackMCMatch_cfi";
/// Declares the chi2 associator.
pub const CHI2_ASSOCIATOR_CFI: &str = "SimTracker.TrackAssociation.TrackAssociatorByChi2_cfi";
/// Declares the position associator.
pub const POSITION_ASSOCIATOR_CFI: &str =
    "SimTracker.TrackAssociation.TrackAssociatorByPosition_cfi";
/// Declares the along-momentum propagator.
pub const PROPAGATOR_ALONG_CFI: &str =
    "TrackPropagation.SteppingHelixPropagator.SteppingHelixPropagatorAlong_cfi";
/// Declares the global tracking geometry.
pub const GLOBAL_TRACKING_GEOMETRY_CFI: &str = "Geometry.CommonDetUnit.globalTrackingGeometry_cfi";
/// Gathers everything the position associator needs.
pub const POSITION_ASSOCIATOR_CFF: &str =
    "SimTracker.TrackAssociation.TrackAssociatorByPosition_cff";

/// Returns the schema of every catalog component.
pub fn standard_schemas() -> Vec<Arc<RecordSchema>> {
    vec![
        Arc::clone(HitAssociatorConfig::schema()),
        Arc::clone(TruthMatchConfig::schema()),
        Arc::clone(Chi2AssociatorConfig::schema()),
        Arc::clone(PositionAssociatorConfig::schema()),
        Arc::clone(propagator::schema()),
        Arc::clone(geometry::schema()),
    ]
}

/// Builds the standard namespaces.
///
/// The composite `TrackAssociatorByPosition_cff` declares no records of its own; it
/// imports the propagator, the geometry and the position associator.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::{self, POSITION_ASSOCIATOR_CFF};
///
/// let namespaces = catalog::standard_namespaces().unwrap();
/// let cff = namespaces
///     .iter()
///     .find(|ns| ns.name() == POSITION_ASSOCIATOR_CFF)
///     .unwrap();
/// assert!(cff.is_empty());
/// assert_eq!(cff.imports().len(), 3);
/// ```
pub fn standard_namespaces() -> Result<Vec<Namespace>> {
    let namespaces = vec![
        Namespace::new(HIT_ASSOCIATOR_CFI).bind(
            "TrackAssociatorByHitsESProducer",
            HitAssociatorConfig::standard().to_record()?,
        )?,
        Namespace::new(TRUTH_MATCH_CFI)
            .bind("trackMCMatch", TruthMatchConfig::standard().to_record()?)?,
        Namespace::new(CHI2_ASSOCIATOR_CFI).bind(
            "TrackAssociatorByChi2ESProducer",
            Chi2AssociatorConfig::standard().to_record()?,
        )?,
        Namespace::new(POSITION_ASSOCIATOR_CFI).bind(
            "TrackAssociatorByPosition",
            PositionAssociatorConfig::standard().to_record()?,
        )?,
        Namespace::new(PROPAGATOR_ALONG_CFI)
            .bind("SteppingHelixPropagatorAlong", propagator::along()?)?,
        Namespace::new(GLOBAL_TRACKING_GEOMETRY_CFI)
            .bind("GlobalTrackingGeometryESProducer", geometry::record()?)?,
        Namespace::new(POSITION_ASSOCIATOR_CFF)
            .with_import(PROPAGATOR_ALONG_CFI)
            .with_import(GLOBAL_TRACKING_GEOMETRY_CFI)
            .with_import(POSITION_ASSOCIATOR_CFI),
    ];
    Ok(namespaces)
}

pub(crate) fn expect_kind(
    record: &ParameterRecord,
    schema: &RecordSchema,
) -> std::result::Result<(), SchemaError> {
    if record.kind() == schema.kind() {
        Ok(())
    } else {
        Err(SchemaError::WrongKind {
            expected: schema.kind().to_string(),
            found: record.kind().to_string(),
        })
    }
}

pub(crate) fn invalid(kind: &str, field: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidValue {
        kind: kind.to_string(),
        field: field.to_string(),
        reason: reason.into(),
    }
}
