//! Loaders and writers surrounding the stopsync reconciliation core.
//!
//! Three concerns live here, all of them thin plumbing around
//! [`stopsync_core`]:
//!
//! - parsing the JOSM editor export into [`stopsync_core::MapStop`] records
//!   while preserving the whole document for later write-back
//!   ([`OsmDocument`]);
//! - parsing the transit-agency registry, in either semicolon-delimited CSV
//!   or GeoJSON form, into [`stopsync_core::RegistryStop`] records
//!   ([`load_registry_stops`]);
//! - writing the corrected document and the tabular diagnostic reports.

#![forbid(unsafe_code)]

mod error;
pub mod osm;
pub mod registry;
pub mod reports;

pub use error::{ParseError, WriteError};
pub use osm::OsmDocument;
pub use registry::{RegistryFormat, load_registry_stops};
