// SPDX-License-Identifier: MIT OR Apache-2.0

//! The position-based track associator.
//!
//! Propagates simulated and reconstructed tracks to a common surface and matches them
//! by distance. It needs a propagator, which it looks up by registered name, and the
//! global tracking geometry.

use crate::catalog::{expect_kind, invalid};
use crate::domain::{
    ComponentCategory, FieldTable, ParameterRecord, ParameterType, RecordSchema, SchemaError,
};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Record kind of the position associator.
pub const KIND: &str = "TrackAssociatorByPosition";

/// Host plugin type of the position associator.
pub const PLUGIN: &str = "TrackAssociatorByPositionESProducer";

const COMPONENT_NAME: &str = "ComponentName";
const PROPAGATOR: &str = "propagator";
const METHOD: &str = "method";
const QMIN_CUT: &str = "QminCut";
const Q_CUT: &str = "QCut";
const MIN_IF_NO_MATCH: &str = "MinIfNoMatch";
const POSITION_MINIMUM_DISTANCE: &str = "positionMinimumDistance";
const CONSIDER_ALL_SIM_HITS: &str = "ConsiderAllSimHits";

static SCHEMA: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    Arc::new(
        RecordSchema::new(KIND, PLUGIN, ComponentCategory::EsProducer)
            .with_field(COMPONENT_NAME, ParameterType::String)
            .with_field(PROPAGATOR, ParameterType::String)
            .with_field(METHOD, ParameterType::String)
            .with_field(QMIN_CUT, ParameterType::Double)
            .with_field(Q_CUT, ParameterType::Double)
            .with_field(MIN_IF_NO_MATCH, ParameterType::Bool)
            .with_field(POSITION_MINIMUM_DISTANCE, ParameterType::Double)
            .with_field(CONSIDER_ALL_SIM_HITS, ParameterType::Bool),
    )
});

/// How the distance between two propagated tracks is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionMethod {
    /// Distance between the two positions, weighted by the errors
    Dist,
    /// Delta-R between the two momenta
    MomDr,
    /// Delta-R between the two positions
    PosDr,
}

impl PositionMethod {
    /// Returns the value written in the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionMethod::Dist => "dist",
            PositionMethod::MomDr => "momdr",
            PositionMethod::PosDr => "posdr",
        }
    }
}

impl fmt::Display for PositionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionMethod {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dist" => Ok(PositionMethod::Dist),
            "momdr" => Ok(PositionMethod::MomDr),
            "posdr" => Ok(PositionMethod::PosDr),
            other => Err(invalid(
                KIND,
                METHOD,
                format!("expected 'dist', 'momdr' or 'posdr', found '{}'", other),
            )),
        }
    }
}

/// Typed view of a position associator record.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::{PositionAssociatorConfig, PositionMethod};
///
/// let config = PositionAssociatorConfig::standard();
/// assert_eq!(config.method, PositionMethod::Dist);
/// assert_eq!(config.propagator, "SteppingHelixPropagatorAlong");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PositionAssociatorConfig {
    /// Name the associator is registered under
    pub component_name: String,
    /// Registered name of the propagator to use
    pub propagator: String,
    /// Distance measure
    pub method: PositionMethod,
    /// Cut on the smallest distance found
    pub qmin_cut: f64,
    /// Cut on the distance of every accepted pair
    pub q_cut: f64,
    /// Keep the closest candidate when nothing passes the cut
    pub min_if_no_match: bool,
    /// Smallest distance to the reference surface for a hit to be used
    pub position_minimum_distance: f64,
    /// Use every simulated hit, not only the innermost
    pub consider_all_sim_hits: bool,
}

impl PositionAssociatorConfig {
    /// Returns the schema of the position associator record.
    pub fn schema() -> &'static Arc<RecordSchema> {
        &SCHEMA
    }

    /// Returns the standard associator settings.
    pub fn standard() -> Self {
        Self {
            component_name: KIND.to_string(),
            propagator: "SteppingHelixPropagatorAlong".to_string(),
            method: PositionMethod::Dist,
            qmin_cut: 120.0,
            q_cut: 10.0,
            min_if_no_match: false,
            position_minimum_distance: 0.0,
            consider_all_sim_hits: true,
        }
    }

    /// Checks the constraints the associator places on its values.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidValue`] if the component or propagator name is
    /// empty.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.component_name.is_empty() {
            return Err(invalid(KIND, COMPONENT_NAME, "component name is empty"));
        }
        if self.propagator.is_empty() {
            return Err(invalid(KIND, PROPAGATOR, "propagator name is empty"));
        }
        Ok(())
    }

    /// Builds the record for these settings.
    pub fn to_record(&self) -> Result<ParameterRecord, SchemaError> {
        self.validate()?;
        let table = FieldTable::new()
            .with(COMPONENT_NAME, self.component_name.clone())
            .with(PROPAGATOR, self.propagator.clone())
            .with(METHOD, self.method.as_str())
            .with(QMIN_CUT, self.qmin_cut)
            .with(Q_CUT, self.q_cut)
            .with(MIN_IF_NO_MATCH, self.min_if_no_match)
            .with(POSITION_MINIMUM_DISTANCE, self.position_minimum_distance)
            .with(CONSIDER_ALL_SIM_HITS, self.consider_all_sim_hits);
        ParameterRecord::new(Self::schema(), table)
    }
}

impl TryFrom<&ParameterRecord> for PositionAssociatorConfig {
    type Error = SchemaError;

    fn try_from(record: &ParameterRecord) -> Result<Self, Self::Error> {
        expect_kind(record, Self::schema())?;
        let config = Self {
            component_name: record.get_string(COMPONENT_NAME)?.to_string(),
            propagator: record.get_string(PROPAGATOR)?.to_string(),
            method: record.get_string(METHOD)?.parse()?,
            qmin_cut: record.get_double(QMIN_CUT)?,
            q_cut: record.get_double(Q_CUT)?,
            min_if_no_match: record.get_bool(MIN_IF_NO_MATCH)?,
            position_minimum_distance: record.get_double(POSITION_MINIMUM_DISTANCE)?,
            consider_all_sim_hits: record.get_bool(CONSIDER_ALL_SIM_HITS)?,
        };
        config.validate()?;
        Ok(config)
    }
}
