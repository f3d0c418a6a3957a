//! Flat diagnostic records destined for tabular reports.

use serde::Serialize;

/// A map stop without a registry counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedRecord {
    /// Internal map identifier.
    pub id: i64,
    /// Public identifier, when the stop carried one.
    #[serde(rename = "ref")]
    pub ref_id: Option<String>,
}

/// A matched stop whose existing `shelter` tag disagrees with the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterConflictRecord {
    /// Internal map identifier.
    pub id: i64,
    /// Public identifier used for the match.
    #[serde(rename = "ref")]
    pub ref_id: String,
    /// Shelter value carried by the map stop.
    pub map_shelter: String,
    /// Shelter value the registry would assign.
    pub registry_shelter: String,
}

/// A matched stop further from its registry counterpart than the tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRecord {
    /// Internal map identifier.
    pub id: i64,
    /// Public identifier used for the match.
    #[serde(rename = "ref")]
    pub ref_id: String,
    /// Great-circle distance between the two records, in metres.
    pub distance_m: f64,
    /// Map-side latitude.
    pub map_lat: f64,
    /// Map-side longitude.
    pub map_lon: f64,
    /// Registry-side latitude.
    pub registry_lat: f64,
    /// Registry-side longitude.
    pub registry_lon: f64,
}
