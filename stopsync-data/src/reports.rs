//! Tabular diagnostic reports for spreadsheet inspection.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use stopsync_core::RunReport;

use crate::error::WriteError;

/// File name of the unmatched-stops report.
pub const UNMATCHED_FILE: &str = "unmatched.csv";
/// File name of the shelter-conflict report.
pub const SHELTER_CONFLICTS_FILE: &str = "shelter_conflicts.csv";
/// File name of the distance-exceeded report.
pub const DISTANCE_EXCEEDED_FILE: &str = "distance_exceeded.csv";
/// File name of the stats report.
pub const STATS_FILE: &str = "stats.csv";

/// Write the four diagnostic reports into `dir`, creating it if needed.
///
/// Headers are always written, so an empty bucket still produces a
/// well-formed file.
///
/// # Errors
/// Returns [`WriteError`] on the first report that fails to serialise.
pub fn write_reports(dir: &Utf8Path, report: &RunReport) -> Result<(), WriteError> {
    std::fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.to_owned(),
        source,
    })?;
    write_records(
        dir.join(UNMATCHED_FILE),
        &["id", "ref"],
        &report.unmatched,
    )?;
    write_records(
        dir.join(SHELTER_CONFLICTS_FILE),
        &["id", "ref", "map_shelter", "registry_shelter"],
        &report.shelter_conflicts,
    )?;
    write_records(
        dir.join(DISTANCE_EXCEEDED_FILE),
        &[
            "id",
            "ref",
            "distance_m",
            "map_lat",
            "map_lon",
            "registry_lat",
            "registry_lon",
        ],
        &report.distance_exceeded,
    )?;
    write_stats(dir.join(STATS_FILE), report)
}

fn write_records<T: Serialize>(
    path: Utf8PathBuf,
    header: &[&str],
    records: &[T],
) -> Result<(), WriteError> {
    let csv_err = |source| WriteError::Csv {
        path: path.clone(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(csv_err)?;
    writer.write_record(header).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })
}

fn write_stats(path: Utf8PathBuf, report: &RunReport) -> Result<(), WriteError> {
    let csv_err = |source| WriteError::Csv {
        path: path.clone(),
        source,
    };
    let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
    writer.write_record(["stat", "value"]).map_err(csv_err)?;
    for (name, value) in report.stats.rows() {
        writer
            .write_record([name, value.to_string().as_str()])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })
}
