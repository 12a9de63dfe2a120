// SPDX-License-Identifier: MIT OR Apache-2.0

//! The hit-based track associator.
//!
//! The associator matches reconstructed tracks to simulated tracks by counting the
//! tracker hits they share. Its record says which sub-detectors take part, how shared
//! hits are counted and what fraction of shared hits makes a match.

use crate::catalog::{expect_kind, invalid};
use crate::domain::{
    ComponentCategory, FieldTable, ParameterRecord, ParameterType, RecordSchema, SchemaError,
};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Record kind of the hit associator, and the name it is registered under.
pub const KIND: &str = "TrackAssociatorByHits";

/// Host plugin type of the hit associator.
pub const PLUGIN: &str = "TrackAssociatorByHitsESProducer";

/// The simulated-hit collections read by the standard associator, one per tracker
/// sub-detector and timing window.
pub const STANDARD_ROU_LIST: [&str; 12] = [
    "TrackerHitsTIBLowTof",
    "TrackerHitsTIBHighTof",
    "TrackerHitsTIDLowTof",
    "TrackerHitsTIDHighTof",
    "TrackerHitsTOBLowTof",
    "TrackerHitsTOBHighTof",
    "TrackerHitsTECLowTof",
    "TrackerHitsTECHighTof",
    "TrackerHitsPixelBarrelLowTof",
    "TrackerHitsPixelBarrelHighTof",
    "TrackerHitsPixelEndcapLowTof",
    "TrackerHitsPixelEndcapHighTof",
];

const ASSOCIATE_RECO_TRACKS: &str = "associateRecoTracks";
const USE_GROUPED: &str = "UseGrouped";
const ASSOCIATE_PIXEL: &str = "associatePixel";
const ROU_LIST: &str = "ROUList";
const USE_SPLITTING: &str = "UseSplitting";
const USE_PIXELS: &str = "UsePixels";
const THREE_HIT_TRACKS_ARE_SPECIAL: &str = "ThreeHitTracksAreSpecial";
const ABSOLUTE_NUMBER_OF_HITS: &str = "AbsoluteNumberOfHits";
const ASSOCIATE_STRIP: &str = "associateStrip";
const MIN_HIT_CUT: &str = "MinHitCut";
const SIM_TO_RECO_DENOMINATOR: &str = "SimToRecoDenominator";

static SCHEMA: Lazy<Arc<RecordSchema>> = Lazy::new(|| {
    Arc::new(
        RecordSchema::new(KIND, PLUGIN, ComponentCategory::EsProducer)
            .with_field(ASSOCIATE_RECO_TRACKS, ParameterType::Bool)
            .with_field(USE_GROUPED, ParameterType::Bool)
            .with_field(ASSOCIATE_PIXEL, ParameterType::Bool)
            .with_field(ROU_LIST, ParameterType::VString)
            .with_field(USE_SPLITTING, ParameterType::Bool)
            .with_field(USE_PIXELS, ParameterType::Bool)
            .with_field(THREE_HIT_TRACKS_ARE_SPECIAL, ParameterType::Bool)
            .with_field(ABSOLUTE_NUMBER_OF_HITS, ParameterType::Bool)
            .with_field(ASSOCIATE_STRIP, ParameterType::Bool)
            .with_field(MIN_HIT_CUT, ParameterType::Double)
            .with_field(SIM_TO_RECO_DENOMINATOR, ParameterType::String),
    )
});

/// Which hit count the shared-hit fraction is taken over when associating
/// simulated tracks to reconstructed ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Denominator {
    /// The number of simulated hits
    Sim,
    /// The number of reconstructed hits
    Reco,
}

impl Denominator {
    /// Returns the value written in the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Denominator::Sim => "sim",
            Denominator::Reco => "reco",
        }
    }
}

impl fmt::Display for Denominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Denominator {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sim" => Ok(Denominator::Sim),
            "reco" => Ok(Denominator::Reco),
            other => Err(invalid(
                KIND,
                SIM_TO_RECO_DENOMINATOR,
                format!("expected 'sim' or 'reco', found '{}'", other),
            )),
        }
    }
}

/// Typed view of a hit associator record.
///
/// # Examples
///
/// ```
/// use hexpset::catalog::{Denominator, HitAssociatorConfig};
///
/// let record = HitAssociatorConfig::standard().to_record().unwrap();
/// assert_eq!(record.get_vstring("ROUList").unwrap().len(), 12);
///
/// let config = HitAssociatorConfig::try_from(&record).unwrap();
/// assert_eq!(config.sim_to_reco_denominator, Denominator::Sim);
/// assert_eq!(config.min_hit_cut, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HitAssociatorConfig {
    /// Associate reconstructed tracks rather than seeds
    pub associate_reco_tracks: bool,
    /// Count grouped hits once
    pub use_grouped: bool,
    /// Read pixel hits
    pub associate_pixel: bool,
    /// Simulated-hit collections to read
    pub rou_list: Vec<String>,
    /// Count split clusters separately
    pub use_splitting: bool,
    /// Include pixel hits in the shared-hit count
    pub use_pixels: bool,
    /// Require every hit of a three-hit track to be shared
    pub three_hit_tracks_are_special: bool,
    /// Treat `min_hit_cut` as an absolute hit count instead of a fraction
    pub absolute_number_of_hits: bool,
    /// Read strip hits
    pub associate_strip: bool,
    /// Minimum shared-hit fraction, or count, for a match
    pub min_hit_cut: f64,
    /// Denominator of the shared-hit fraction in sim-to-reco association
    pub sim_to_reco_denominator: Denominator,
}

impl HitAssociatorConfig {
    /// Returns the schema of the hit associator record.
    pub fn schema() -> &'static Arc<RecordSchema> {
        &SCHEMA
    }

    /// Returns the standard associator settings.
    pub fn standard() -> Self {
        Self {
            associate_reco_tracks: true,
            use_grouped: true,
            associate_pixel: true,
            rou_list: STANDARD_ROU_LIST.iter().map(|s| s.to_string()).collect(),
            use_splitting: false,
            use_pixels: true,
            three_hit_tracks_are_special: true,
            absolute_number_of_hits: false,
            associate_strip: true,
            min_hit_cut: 0.5,
            sim_to_reco_denominator: Denominator::Sim,
        }
    }

    /// Checks the constraints the associator places on its values.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidValue`] if `min_hit_cut` is negative or not finite.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.min_hit_cut.is_finite() || self.min_hit_cut < 0.0 {
            return Err(invalid(
                KIND,
                MIN_HIT_CUT,
                format!("must be a finite non-negative number, found {}", self.min_hit_cut),
            ));
        }
        Ok(())
    }

    /// Builds the record for these settings.
    pub fn to_record(&self) -> Result<ParameterRecord, SchemaError> {
        self.validate()?;
        let table = FieldTable::new()
            .with(ASSOCIATE_RECO_TRACKS, self.associate_reco_tracks)
            .with(USE_GROUPED, self.use_grouped)
            .with(ASSOCIATE_PIXEL, self.associate_pixel)
            .with(ROU_LIST, self.rou_list.clone())
            .with(USE_SPLITTING, self.use_splitting)
            .with(USE_PIXELS, self.use_pixels)
            .with(THREE_HIT_TRACKS_ARE_SPECIAL, self.three_hit_tracks_are_special)
            .with(ABSOLUTE_NUMBER_OF_HITS, self.absolute_number_of_hits)
            .with(ASSOCIATE_STRIP, self.associate_strip)
            .with(MIN_HIT_CUT, self.min_hit_cut)
            .with(SIM_TO_RECO_DENOMINATOR, self.sim_to_reco_denominator.as_str());
        ParameterRecord::new(Self::schema(), table)
    }
}

impl TryFrom<&ParameterRecord> for HitAssociatorConfig {
    type Error = SchemaError;

    fn try_from(record: &ParameterRecord) -> Result<Self, Self::Error> {
        expect_kind(record, Self::schema())?;
        let config = Self {
            associate_reco_tracks: record.get_bool(ASSOCIATE_RECO_TRACKS)?,
            use_grouped: record.get_bool(USE_GROUPED)?,
            associate_pixel: record.get_bool(ASSOCIATE_PIXEL)?,
            rou_list: record.get_vstring(ROU_LIST)?.to_vec(),
            use_splitting: record.get_bool(USE_SPLITTING)?,
            use_pixels: record.get_bool(USE_PIXELS)?,
            three_hit_tracks_are_special: record.get_bool(THREE_HIT_TRACKS_ARE_SPECIAL)?,
            absolute_number_of_hits: record.get_bool(ABSOLUTE_NUMBER_OF_HITS)?,
            associate_strip: record.get_bool(ASSOCIATE_STRIP)?,
            min_hit_cut: record.get_double(MIN_HIT_CUT)?,
            sim_to_reco_denominator: record.get_string(SIM_TO_RECO_DENOMINATOR)?.parse()?,
        };
        config.validate()?;
        Ok(config)
    }
}
