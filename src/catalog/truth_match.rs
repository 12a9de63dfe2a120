// SPDX-License-Identifier: MIT OR Apache-2.0

//! The truth-match filter.
//!
//! The filter associates reconstructed tracks with tracking particles and writes, for
//! every track, a reference to the generator particle it came from. The associator is
//! chosen by name at run time, so the record holds a string rather than a reference to
//! another record.

use crate::catalog::{expect_kind, hit_associator, invalid};
use crate::domain::{
    ComponentCategory, FieldTable, InputTag, ParameterRecord, ParameterType, RecordSchema,
    SchemaError,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Record kind of the truth-match filter.
pub const KIND: &str = "MCTrackMatcher";

/// Host plugin type of the truth-match filter.
pub const PLUGIN: &str = "MCTrackMatcher";

const TRACKING_PARTICLES: &str = "trackingParticles";
const TRACKS: &str = "tracks";
const GEN_PARTICLES: &str = "genParticles";
const ASSOCIATOR: &str = "associator";

static SCHEMA: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    Arc::new(
        RecordSchema::new(KIND, PLUGIN, ComponentCategory::EdFilter)
            .with_field(TRACKING_PARTICLES, ParameterType::InputTag)
            .with_field(TRACKS, ParameterType::InputTag)
            .with_field(GEN_PARTICLES, ParameterType::InputTag)
            .with_field(ASSOCIATOR, ParameterType::String),
    )
});

/// Typed view of a truth-match filter record.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::TruthMatchConfig;
///
/// let config = TruthMatchConfig::standard();
/// assert_eq!(config.tracks.to_string(), "generalTracks");
/// assert_eq!(config.associator, "TrackAssociatorByHits");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthMatchConfig {
    /// The merged tracking-particle collection
    pub tracking_particles: InputTag,
    /// The reconstructed tracks to match
    pub tracks: InputTag,
    /// The generator particles the matches point to
    pub gen_particles: InputTag,
    /// Registered name of the track associator to use
    pub associator: String,
}

impl TruthMatchConfig {
    /// Returns the schema of the truth-match record.
    pub fn schema() -> &'static Arc<RecordSchema> {
        &SCHEMA
    }

    /// Returns the standard filter settings, which use the hit associator.
    pub fn standard() -> Self {
        Self {
            tracking_particles: InputTag::from_static("mergedtruth", "MergedTrackTruth"),
            tracks: InputTag::from_static("generalTracks", ""),
            gen_particles: InputTag::from_static("genParticles", ""),
            associator: hit_associator::KIND.to_string(),
        }
    }

    /// Checks the constraints the filter places on its values.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidValue`] if the associator name is empty.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.associator.is_empty() {
            return Err(invalid(KIND, ASSOCIATOR, "associator name is empty"));
        }
        Ok(())
    }

    /// Builds the record for these settings.
    pub fn to_record(&self) -> Result<ParameterRecord, SchemaError> {
        self.validate()?;
        let table = FieldTable::new()
            .with(TRACKING_PARTICLES, self.tracking_particles.clone())
            .with(TRACKS, self.tracks.clone())
            .with(GEN_PARTICLES, self.gen_particles.clone())
            .with(ASSOCIATOR, self.associator.clone());
        ParameterRecord::new(Self::schema(), table)
    }
}

impl TryFrom<&ParameterRecord> for TruthMatchConfig {
    type Error = SchemaError;

    fn try_from(record: &ParameterRecord) -> Result<Self, Self::Error> {
        expect_kind(record, Self::schema())?;
        let config = Self {
            tracking_particles: record.get_input_tag(TRACKING_PARTICLES)?.clone(),
            tracks: record.get_input_tag(TRACKS)?.clone(),
            gen_particles: record.get_input_tag(GEN_PARTICLES)?.clone(),
            associator: record.get_string(ASSOCIATOR)?.to_string(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HitAssociatorConfig;
    use crate::domain::ParameterValue;

    #[test]
    fn test_standard_record() {
        let record = TruthMatchConfig::standard().to_record().unwrap();
        assert_eq!(record.category(), ComponentCategory::EdFilter);
        assert_eq!(record.len(), 4);

        let particles = record.get_input_tag("trackingParticles").unwrap();
        assert_eq!(particles.label(), "mergedtruth");
        assert_eq!(particles.instance(), "MergedTrackTruth");

        let tracks = record.get_input_tag("tracks").unwrap();
        assert_eq!(tracks.label(), "generalTracks");
        assert_eq!(tracks.instance(), "");
    }

    #[test]
    fn test_associator_names_hit_associator_kind() {
        let filter = TruthMatchConfig::standard().to_record().unwrap();
        let hits = HitAssociatorConfig::standard().to_record().unwrap();
        assert_eq!(filter.get_string("associator").unwrap(), hits.kind());
    }

    #[test]
    fn test_empty_associator_is_rejected() {
        let config = TruthMatchConfig {
            associator: String::new(),
            ..TruthMatchConfig::standard()
        };
        assert!(matches!(
            config.to_record(),
            Err(SchemaError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_view_round_trip() {
        let config = TruthMatchConfig::standard();
        let record = config.to_record().unwrap();
        assert_eq!(TruthMatchConfig::try_from(&record).unwrap(), config);
    }

    #[test]
    fn test_tag_must_be_tag() {
        let table = TruthMatchConfig::standard()
            .to_record()
            .unwrap()
            .to_field_table()
            .into_iter()
            .map(|(name, value)| {
                if name.as_str() == "tracks" {
                    (name, ParameterValue::from("generalTracks"))
                } else {
                    (name, value)
                }
            })
            .collect::<FieldTable>();
        let err = ParameterRecord::new(TruthMatchConfig::schema(), table).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                kind: KIND.to_string(),
                field: "tracks".to_string(),
                expected: ParameterType::InputTag,
                found: ParameterType::String,
            }
        );
    }
}
