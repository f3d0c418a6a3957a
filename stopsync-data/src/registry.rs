//! Transit-registry loaders.
//!
//! The agency publishes the same stop registry in two shapes: a
//! semicolon-delimited CSV export and a GeoJSON feature collection. Both
//! carry the same JORE column names and reduce to the one
//! [`RegistryStop`] shape; the reconciler never learns which format fed it.

use camino::Utf8Path;
use geo::Coord;
use serde::Deserialize;
use stopsync_core::RegistryStop;

use crate::error::ParseError;

/// Source format of the registry file, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    /// Semicolon-delimited JORE CSV export.
    Csv,
    /// GeoJSON feature collection with JORE properties.
    GeoJson,
}

impl RegistryFormat {
    /// Infer the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext)
                if ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json") =>
            {
                Self::GeoJson
            }
            _ => Self::Csv,
        }
    }
}

/// JORE stop-type codes for stops without a shelter: `04` is a plain pole,
/// `08` a bare stop position. An empty code is treated the same way.
fn sheltered_from_stop_type(code: &str) -> bool {
    !matches!(code, "04" | "08" | "")
}

/// Load registry stops from either supported format.
///
/// # Errors
/// Returns [`ParseError`] when the file cannot be read or a record cannot
/// be decoded. The run aborts; there is no partial result.
pub fn load_registry_stops(
    path: &Utf8Path,
    format: RegistryFormat,
) -> Result<Vec<RegistryStop>, ParseError> {
    match format {
        RegistryFormat::Csv => load_csv(path),
        RegistryFormat::GeoJson => load_geojson(path),
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "SOLMUTUNNU")]
    node_id: String,
    #[serde(rename = "LYHYTTUNNU")]
    ref_id: String,
    #[serde(rename = "NIMI1")]
    name_fi: String,
    #[serde(rename = "NAMN2")]
    name_sv: String,
    #[serde(rename = "PYSAKKITYY")]
    stop_type: String,
    #[serde(rename = "LAT")]
    lat: f64,
    #[serde(rename = "LON")]
    lon: f64,
}

fn load_csv(path: &Utf8Path) -> Result<Vec<RegistryStop>, ParseError> {
    let file = std::fs::File::open(path).map_err(|source| ParseError::Io {
        path: path.to_owned(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(file);
    let mut stops = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row.map_err(|source| ParseError::Csv {
            path: path.to_owned(),
            source,
        })?;
        stops.push(RegistryStop {
            node_id: row.node_id,
            ref_id: row.ref_id,
            name_fi: row.name_fi,
            name_sv: row.name_sv,
            location: Coord {
                x: row.lon,
                y: row.lat,
            },
            sheltered: sheltered_from_stop_type(&row.stop_type),
        });
    }
    Ok(stops)
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "SOLMUTUNNU")]
    node_id: String,
    #[serde(rename = "LYHYTTUNNU")]
    ref_id: String,
    #[serde(rename = "NIMI1")]
    name_fi: String,
    #[serde(rename = "NAMN2")]
    name_sv: String,
    #[serde(rename = "PYSAKKITYY")]
    stop_type: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

fn load_geojson(path: &Utf8Path) -> Result<Vec<RegistryStop>, ParseError> {
    let file = std::fs::File::open(path).map_err(|source| ParseError::Io {
        path: path.to_owned(),
        source,
    })?;
    let collection: FeatureCollection =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            ParseError::Json {
                path: path.to_owned(),
                source,
            }
        })?;
    collection
        .features
        .into_iter()
        .map(|feature| {
            if feature.geometry.kind != "Point" {
                return Err(geometry_error(path, &feature));
            }
            let &[lon, lat] = feature.geometry.coordinates.as_slice() else {
                return Err(geometry_error(path, &feature));
            };
            Ok(RegistryStop {
                sheltered: sheltered_from_stop_type(&feature.properties.stop_type),
                node_id: feature.properties.node_id,
                ref_id: feature.properties.ref_id,
                name_fi: feature.properties.name_fi,
                name_sv: feature.properties.name_sv,
                location: Coord { x: lon, y: lat },
            })
        })
        .collect()
}

fn geometry_error(path: &Utf8Path, feature: &Feature) -> ParseError {
    ParseError::Geometry {
        path: path.to_owned(),
        feature: feature.properties.node_id.clone(),
        kind: feature.geometry.kind.clone(),
    }
}
