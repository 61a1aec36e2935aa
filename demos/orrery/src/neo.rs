//! Near-earth-object feed parsing.
//!
//! Only the fields the scene uses are deserialised; everything else in the
//! feed is ignored.

use std::collections::BTreeMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed has no entry for {0}")]
    MissingDate(String),
}

/// One NEO as shown in the info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoRecord {
    pub name: String,
    pub diameter_km: f64,
    /// Relative velocity, kept as the feed's decimal string.
    pub velocity_kmh: String,
    /// Miss distance, kept as the feed's decimal string.
    pub miss_distance_km: String,
    pub hazardous: bool,
}

impl NeoRecord {
    /// Panel text, one fact per line.
    pub fn info_text(&self) -> String {
        format!(
            "{}\nDiameter: {} km\nVelocity: {} km/h\nMiss Distance: {} km\nPotentially Hazardous: {}",
            self.name,
            self.diameter_km,
            self.velocity_kmh,
            self.miss_distance_km,
            if self.hazardous { "Yes" } else { "No" },
        )
    }
}

#[derive(Deserialize)]
struct Feed {
    near_earth_objects: BTreeMap<String, Vec<RawNeo>>,
}

#[derive(Deserialize)]
struct RawNeo {
    name: String,
    estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    close_approach_data: Vec<CloseApproach>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
}

#[derive(Deserialize)]
struct EstimatedDiameter {
    kilometers: DiameterRange,
}

#[derive(Deserialize)]
struct DiameterRange {
    estimated_diameter_max: f64,
}

#[derive(Deserialize)]
struct CloseApproach {
    relative_velocity: RelativeVelocity,
    miss_distance: MissDistance,
}

#[derive(Deserialize)]
struct RelativeVelocity {
    kilometers_per_hour: String,
}

#[derive(Deserialize)]
struct MissDistance {
    kilometers: String,
}

/// Parse the feed and return the objects listed under `date`.
/// Objects without close-approach data are skipped.
pub fn parse_feed(json: &str, date: &str) -> Result<Vec<NeoRecord>, FeedError> {
    let mut feed: Feed = serde_json::from_str(json)?;
    let raw = feed
        .near_earth_objects
        .remove(date)
        .ok_or_else(|| FeedError::MissingDate(date.to_string()))?;

    let records = raw
        .into_iter()
        .filter_map(|neo| {
            let Some(approach) = neo.close_approach_data.into_iter().next() else {
                log::warn!("NEO {} has no close approach data, skipped", neo.name);
                return None;
            };
            Some(NeoRecord {
                name: neo.name,
                diameter_km: neo.estimated_diameter.kilometers.estimated_diameter_max,
                velocity_kmh: approach.relative_velocity.kilometers_per_hour,
                miss_distance_km: approach.miss_distance.kilometers,
                hazardous: neo.is_potentially_hazardous_asteroid,
            })
        })
        .collect();
    Ok(records)
}

/// Find a record by exact name.
pub fn find_by_name<'a>(records: &'a [NeoRecord], name: &str) -> Option<(usize, &'a NeoRecord)> {
    records.iter().enumerate().find(|(_, r)| r.name == name)
}
