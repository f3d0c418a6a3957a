//! Behaviour of the tabular report writer.

use camino::Utf8PathBuf;
use stopsync_core::{RunReport, RunStats, ShelterConflictRecord, UnmatchedRecord};
use stopsync_data::reports;
use tempfile::TempDir;

fn report() -> RunReport {
    RunReport {
        unmatched: vec![
            UnmatchedRecord {
                id: 502,
                ref_id: Some("4321".into()),
            },
            UnmatchedRecord {
                id: 600,
                ref_id: None,
            },
        ],
        shelter_conflicts: vec![ShelterConflictRecord {
            id: 503,
            ref_id: "1234".into(),
            map_shelter: "no".into(),
            registry_shelter: "yes".into(),
        }],
        stats: RunStats {
            total: 3,
            matched: 1,
            unmatched: 2,
            shelter_conflicts: 1,
            ..RunStats::default()
        },
        ..RunReport::default()
    }
}

#[test]
fn writes_all_four_reports_with_headers() {
    let dir = TempDir::new().unwrap();
    let out = Utf8PathBuf::from_path_buf(dir.path().join("reports")).unwrap();
    reports::write_reports(&out, &report()).unwrap();

    let unmatched = std::fs::read_to_string(out.join(reports::UNMATCHED_FILE)).unwrap();
    assert!(unmatched.starts_with("id,ref"));
    assert!(unmatched.contains("502,4321"));
    assert!(unmatched.contains("600,"));

    let conflicts = std::fs::read_to_string(out.join(reports::SHELTER_CONFLICTS_FILE)).unwrap();
    assert!(conflicts.starts_with("id,ref,map_shelter,registry_shelter"));
    assert!(conflicts.contains("503,1234,no,yes"));

    // Empty bucket still yields a well-formed file.
    let distance = std::fs::read_to_string(out.join(reports::DISTANCE_EXCEEDED_FILE)).unwrap();
    assert!(distance.starts_with("id,ref,distance_m"));
    assert_eq!(distance.lines().count(), 1);

    let stats = std::fs::read_to_string(out.join(reports::STATS_FILE)).unwrap();
    assert!(stats.contains("total,3"));
    assert!(stats.contains("shelter_conflicts,1"));
}
