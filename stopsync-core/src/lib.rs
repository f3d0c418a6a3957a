//! Core matching and reconciliation logic for stopsync.
//!
//! The crate joins a map-editor export of public-transport stops against an
//! authoritative transit-agency registry, validates each match by geographic
//! proximity, and applies conditional tag transformations without clobbering
//! existing human-entered data. It performs no I/O: callers hand it
//! pre-parsed collections of [`MapStop`] and [`RegistryStop`] records plus a
//! [`RunConfig`], and receive the mutated stops together with a [`RunReport`]
//! of diagnostic buckets and run statistics.

#![forbid(unsafe_code)]

mod config;
mod distance;
mod index;
mod reconcile;
mod report;
mod stats;
mod stop;
mod transform;

pub use config::{
    BoundingBoxRegion, ConfigError, DEFAULT_MAX_DISTANCE_M, DEFAULT_PREFIX, RegionPredicate,
    RunConfig,
};
pub use distance::{EARTH_RADIUS_M, haversine_meters};
pub use index::RegistryIndex;
pub use reconcile::{MatchOutcome, Reconciler, RunReport};
pub use report::{DistanceRecord, ShelterConflictRecord, UnmatchedRecord};
pub use stats::RunStats;
pub use stop::{MapStop, RegistryStop, Tags, keys, shelter_word};
