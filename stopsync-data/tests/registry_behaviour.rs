//! Behaviour of the two registry loaders.

use camino::Utf8PathBuf;
use rstest::rstest;
use stopsync_data::{ParseError, RegistryFormat, load_registry_stops};
use tempfile::TempDir;

const CSV_SAMPLE: &str = "\
SOLMUTUNNU;LYHYTTUNNU;NIMI1;NAMN2;PYSAKKITYY;LAT;LON
1240114;1234;Keskustori;Centraltorget;01;60.17;24.94
1240115;5678;Rautatientori;Järnvägstorget;04;60.171;24.941
";

const GEOJSON_SAMPLE: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {
        "SOLMUTUNNU": "1240114",
        "LYHYTTUNNU": "1234",
        "NIMI1": "Keskustori",
        "NAMN2": "Centraltorget",
        "PYSAKKITYY": "01"
      },
      "geometry": { "type": "Point", "coordinates": [24.94, 60.17] }
    }
  ]
}"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_rows_become_registry_stops() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "stops.csv", CSV_SAMPLE);
    let stops = load_registry_stops(&path, RegistryFormat::Csv).unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].ref_id, "1234");
    assert_eq!(stops[0].name_fi, "Keskustori");
    assert_eq!(stops[0].name_sv, "Centraltorget");
    assert!(stops[0].sheltered);
    assert_eq!(stops[0].location.x, 24.94);
    assert_eq!(stops[0].location.y, 60.17);
    // Stop type 04 is a plain pole.
    assert!(!stops[1].sheltered);
}

#[test]
fn geojson_features_become_registry_stops() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "stops.geojson", GEOJSON_SAMPLE);
    let stops = load_registry_stops(&path, RegistryFormat::GeoJson).unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].node_id, "1240114");
    assert_eq!(stops[0].ref_id, "1234");
    assert_eq!(stops[0].location.x, 24.94);
    assert_eq!(stops[0].location.y, 60.17);
    assert!(stops[0].sheltered);
}

#[test]
fn both_formats_reduce_to_the_same_shape() {
    let dir = TempDir::new().unwrap();
    let csv = load_registry_stops(
        &write_file(&dir, "stops.csv", CSV_SAMPLE),
        RegistryFormat::Csv,
    )
    .unwrap();
    let geojson = load_registry_stops(
        &write_file(&dir, "stops.geojson", GEOJSON_SAMPLE),
        RegistryFormat::GeoJson,
    )
    .unwrap();
    assert_eq!(csv[0], geojson[0]);
}

#[rstest]
#[case("SOLMUTUNNU;LYHYTTUNNU\n1;2\n", RegistryFormat::Csv)]
#[case("{\"features\": [{\"bad\": true}]}", RegistryFormat::GeoJson)]
fn malformed_registry_is_a_parse_error(#[case] contents: &str, #[case] format: RegistryFormat) {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken", contents);
    let err = load_registry_stops(&path, format).unwrap_err();
    assert!(matches!(err, ParseError::Csv { .. } | ParseError::Json { .. }));
}

#[test]
fn non_point_geometry_is_rejected() {
    let geojson = r#"{
      "features": [
        {
          "properties": {
            "SOLMUTUNNU": "1", "LYHYTTUNNU": "2", "NIMI1": "", "NAMN2": "", "PYSAKKITYY": ""
          },
          "geometry": { "type": "LineString", "coordinates": [1.0, 2.0] }
        }
      ]
    }"#;
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "line.geojson", geojson);
    let err = load_registry_stops(&path, RegistryFormat::GeoJson).unwrap_err();
    assert!(matches!(err, ParseError::Geometry { .. }));
}

#[test]
fn missing_registry_file_is_an_io_error() {
    let err = load_registry_stops(Utf8PathBuf::from("/no/such/stops.csv").as_path(), RegistryFormat::Csv)
        .unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}
