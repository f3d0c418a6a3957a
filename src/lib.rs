//! Facade crate for the stopsync reconciliation engine.
//!
//! This crate re-exports the core domain types so downstream tooling can
//! depend on a single crate. The loaders and writers live in
//! `stopsync-data`; the command-line binary lives in `stopsync-cli`.

#![forbid(unsafe_code)]

pub use stopsync_core::{
    BoundingBoxRegion, ConfigError, MapStop, MatchOutcome, Reconciler, RegionPredicate,
    RegistryIndex, RegistryStop, RunConfig, RunReport, RunStats, Tags, haversine_meters,
};
