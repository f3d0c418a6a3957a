//! Stop records shared by the loaders and the reconciler.

use std::collections::HashMap;

use geo::Coord;

/// OpenStreetMap-style free-form key/value tags.
pub type Tags = HashMap<String, String>;

/// Tag keys the reconciler reads and writes.
pub mod keys {
    /// Public-facing stop identifier, the join key against the registry.
    pub const REF: &str = "ref";
    /// Whether the stop has a shelter, `"yes"` or `"no"`.
    pub const SHELTER: &str = "shelter";
    /// Default display name.
    pub const NAME: &str = "name";
    /// Finnish display name.
    pub const NAME_FI: &str = "name:fi";
    /// Swedish display name.
    pub const NAME_SV: &str = "name:sv";
}

/// Map the registry's shelter flag onto the tag vocabulary.
pub fn shelter_word(sheltered: bool) -> &'static str {
    if sheltered { "yes" } else { "no" }
}

/// A stop from the map-editor export.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The tag
/// map is the only part the reconciler mutates; `ref_id` mirrors the `ref`
/// tag at load time and is kept in sync when the prefix rule fires.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopsync_core::{MapStop, Tags};
///
/// let stop = MapStop::new(
///     42,
///     Coord { x: 24.94, y: 60.17 },
///     Tags::from([("ref".into(), "1234".into())]),
/// );
/// assert_eq!(stop.ref_id.as_deref(), Some("1234"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapStop {
    /// Opaque internal identifier assigned by the source system.
    pub id: i64,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Public-facing identifier, absent when the element carries no `ref` tag.
    pub ref_id: Option<String>,
    /// Free-form tags, mutated in place by the reconciler.
    pub tags: Tags,
}

impl MapStop {
    /// Construct a `MapStop`, deriving `ref_id` from the `ref` tag.
    pub fn new(id: i64, location: Coord<f64>, tags: Tags) -> Self {
        let ref_id = tags.get(keys::REF).cloned();
        Self {
            id,
            location,
            ref_id,
            tags,
        }
    }
}

/// An authoritative record from the transit-agency registry.
///
/// Read-only for the whole pipeline once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStop {
    /// Registry-internal node identifier, retained for log lines.
    pub node_id: String,
    /// Public stop identifier, the join key. Unique within the registry.
    pub ref_id: String,
    /// Finnish display name; may be empty.
    pub name_fi: String,
    /// Swedish display name; may be empty.
    pub name_sv: String,
    /// Geospatial position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Whether the stop has a shelter.
    pub sheltered: bool,
}
