//! Behavioural tests for the reconciliation pipeline.
//!
//! These exercise the documented end-to-end scenarios: authoritative
//! attributes merged into a matched stop, unmatched stops left untouched,
//! and shelter disagreements surfaced without being corrected.

use geo::Coord;
use rstest::{fixture, rstest};
use stopsync_core::{
    MapStop, MatchOutcome, Reconciler, RegistryIndex, RegistryStop, RunConfig, Tags,
};

const KESKUSTA: Coord<f64> = Coord { x: 24.94, y: 60.17 };

#[fixture]
fn keskustori() -> RegistryStop {
    RegistryStop {
        node_id: "1240114".into(),
        ref_id: "1234".into(),
        name_fi: "Keskustori".into(),
        name_sv: "Centraltorget".into(),
        location: KESKUSTA,
        sheltered: true,
    }
}

fn helsinki_reconciler(registry: Vec<RegistryStop>) -> Reconciler {
    Reconciler::new(RegistryIndex::from_stops(registry), RunConfig::helsinki())
}

#[rstest]
fn merges_authoritative_attributes_into_matched_stop(keskustori: RegistryStop) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let mut stops = vec![MapStop::new(
        501,
        KESKUSTA,
        Tags::from([("ref".into(), "1234".into())]),
    )];

    let report = reconciler.run(&mut stops);

    assert_eq!(stops[0].tags.get("ref").map(String::as_str), Some("H1234"));
    assert_eq!(stops[0].tags.get("shelter").map(String::as_str), Some("yes"));
    assert_eq!(
        stops[0].tags.get("name").map(String::as_str),
        Some("Keskustori")
    );
    assert_eq!(stops[0].ref_id.as_deref(), Some("H1234"));
    assert!(matches!(report.outcomes[0], MatchOutcome::Matched { .. }));
    assert_eq!(report.stats.prefixed, 1);
    assert_eq!(report.stats.shelter_added_yes, 1);
    assert_eq!(report.stats.named, 1);
}

#[rstest]
fn unmatched_stop_appears_only_in_unmatched_report(keskustori: RegistryStop) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let original = Tags::from([("ref".into(), "4321".into()), ("highway".into(), "bus_stop".into())]);
    let mut stops = vec![MapStop::new(502, KESKUSTA, original.clone())];

    let report = reconciler.run(&mut stops);

    assert_eq!(stops[0].tags, original);
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].id, 502);
    assert_eq!(report.unmatched[0].ref_id.as_deref(), Some("4321"));
    assert!(report.shelter_conflicts.is_empty());
    assert!(report.distance_exceeded.is_empty());
}

#[rstest]
fn shelter_disagreement_is_reported_not_corrected(keskustori: RegistryStop) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let mut stops = vec![MapStop::new(
        503,
        KESKUSTA,
        Tags::from([("ref".into(), "H1234".into()), ("shelter".into(), "no".into())]),
    )];

    let report = reconciler.run(&mut stops);

    assert_eq!(stops[0].tags.get("shelter").map(String::as_str), Some("no"));
    let record = &report.shelter_conflicts[0];
    assert_eq!(record.id, 503);
    assert_eq!(record.ref_id, "1234");
    assert_eq!(record.map_shelter, "no");
    assert_eq!(record.registry_shelter, "yes");
}

#[rstest]
fn distance_report_carries_both_coordinates(keskustori: RegistryStop) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let far = Coord { x: 24.96, y: 60.18 };
    let mut stops = vec![MapStop::new(
        504,
        far,
        Tags::from([("ref".into(), "H1234".into())]),
    )];

    let report = reconciler.run(&mut stops);

    let record = &report.distance_exceeded[0];
    assert!(record.distance_m > 100.0);
    assert_eq!(record.map_lat, far.y);
    assert_eq!(record.map_lon, far.x);
    assert_eq!(record.registry_lat, KESKUSTA.y);
    assert_eq!(record.registry_lon, KESKUSTA.x);
}

#[rstest]
fn running_twice_changes_nothing_further(keskustori: RegistryStop) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let mut stops = vec![MapStop::new(
        505,
        KESKUSTA,
        Tags::from([("ref".into(), "1234".into())]),
    )];

    reconciler.run(&mut stops);
    let after_first = stops.clone();
    let report = reconciler.run(&mut stops);

    assert_eq!(stops, after_first);
    assert_eq!(report.stats.prefixed, 0);
    assert_eq!(report.stats.shelter_added_yes, 0);
    assert_eq!(report.stats.named, 0);
}

#[rstest]
#[case("1234", true)]
#[case("H1234", true)]
#[case("9999", false)]
fn ref_values_with_and_without_prefix_match_the_same_entry(
    keskustori: RegistryStop,
    #[case] map_ref: &str,
    #[case] expect_match: bool,
) {
    let reconciler = helsinki_reconciler(vec![keskustori]);
    let mut stops = vec![MapStop::new(
        506,
        KESKUSTA,
        Tags::from([("ref".into(), map_ref.to_owned())]),
    )];
    let report = reconciler.run(&mut stops);
    assert_eq!(report.outcomes[0].is_matched(), expect_match);
}
