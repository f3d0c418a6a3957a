//! Error types raised while loading inputs and writing outputs.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while parsing an input document.
///
/// All of these are fatal: the run aborts and no partial output is written.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The editor export was not well-formed XML.
    #[error("malformed XML in {path}")]
    Xml {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from `quick-xml`.
        #[source]
        source: quick_xml::Error,
    },
    /// A registry CSV record could not be decoded.
    #[error("malformed CSV in {path}")]
    Csv {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from the `csv` crate.
        #[source]
        source: csv::Error,
    },
    /// The registry GeoJSON document could not be decoded.
    #[error("malformed GeoJSON in {path}")]
    Json {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A registry feature carried a geometry other than a point.
    #[error("feature {feature} in {path} has non-point geometry {kind:?}")]
    Geometry {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Registry node identifier of the offending feature.
        feature: String,
        /// Geometry type found instead of `Point`.
        kind: String,
    },
    /// A stop element carried an unparseable attribute value.
    #[error("element {id} in {path} has invalid {attribute} value {value:?}")]
    InvalidAttribute {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Element identifier, as found in the document.
        id: String,
        /// Attribute name.
        attribute: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Errors raised while writing the corrected document or the reports.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output file could not be written.
    #[error("failed to write {path}")]
    Io {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The corrected document could not be serialised.
    #[error("failed to serialise {path}")]
    Xml {
        /// Destination path.
        path: Utf8PathBuf,
        /// Source error from `quick-xml`.
        #[source]
        source: quick_xml::Error,
    },
    /// A report record could not be serialised.
    #[error("failed to write report {path}")]
    Csv {
        /// Destination path.
        path: Utf8PathBuf,
        /// Source error from the `csv` crate.
        #[source]
        source: csv::Error,
    },
}
