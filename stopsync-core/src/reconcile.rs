//! Joins map stops to registry stops and classifies every outcome.

use log::{debug, info};

use crate::config::RunConfig;
use crate::distance::haversine_meters;
use crate::index::RegistryIndex;
use crate::report::{DistanceRecord, ShelterConflictRecord, UnmatchedRecord};
use crate::stats::RunStats;
use crate::stop::{MapStop, RegistryStop, keys, shelter_word};
use crate::transform;

/// Classification of a single map stop against the registry.
///
/// Every input stop receives exactly one outcome, in input order. The
/// shelter-conflict and distance diagnostics are not mutually exclusive at
/// the data level; when both apply, `DistanceExceeded` wins here because it
/// casts doubt on the match itself, while both diagnostic buckets in the
/// [`RunReport`] still record the stop.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Registry match within tolerance, no shelter disagreement.
    Matched {
        /// Identifier the join used.
        ref_id: String,
        /// Distance between the two records, in metres.
        distance_m: f64,
    },
    /// `ref` absent, or not found in the registry. Tags left untouched.
    NoRegistryMatch,
    /// Matched, but the existing `shelter` tag disagrees with the registry.
    ShelterConflict {
        /// Identifier the join used.
        ref_id: String,
        /// Distance between the two records, in metres.
        distance_m: f64,
    },
    /// Matched, but further away than the configured tolerance.
    DistanceExceeded {
        /// Identifier the join used.
        ref_id: String,
        /// Distance between the two records, in metres.
        distance_m: f64,
    },
}

impl MatchOutcome {
    /// Whether the stop found a registry counterpart.
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::NoRegistryMatch)
    }
}

/// Everything a run produces besides the mutated stops themselves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    /// One outcome per input stop, in input order.
    pub outcomes: Vec<MatchOutcome>,
    /// Stops with no registry counterpart.
    pub unmatched: Vec<UnmatchedRecord>,
    /// Matched stops whose shelter tag disagrees with the registry.
    pub shelter_conflicts: Vec<ShelterConflictRecord>,
    /// Matched stops beyond the distance tolerance.
    pub distance_exceeded: Vec<DistanceRecord>,
    /// Aggregate counters.
    pub stats: RunStats,
}

/// Single-pass matcher over a pre-built [`RegistryIndex`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopsync_core::{MapStop, Reconciler, RegistryIndex, RegistryStop, RunConfig, Tags};
///
/// let registry = RegistryStop {
///     node_id: "100".into(),
///     ref_id: "1234".into(),
///     name_fi: "Keskustori".into(),
///     name_sv: String::new(),
///     location: Coord { x: 24.94, y: 60.17 },
///     sheltered: true,
/// };
/// let reconciler = Reconciler::new(
///     RegistryIndex::from_stops([registry]),
///     RunConfig::helsinki(),
/// );
/// let mut stops = vec![MapStop::new(
///     1,
///     Coord { x: 24.94, y: 60.17 },
///     Tags::from([("ref".into(), "1234".into())]),
/// )];
/// let report = reconciler.run(&mut stops);
/// assert_eq!(report.stats.matched, 1);
/// assert_eq!(stops[0].tags.get("ref").map(String::as_str), Some("H1234"));
/// ```
#[derive(Debug)]
pub struct Reconciler {
    index: RegistryIndex,
    config: RunConfig,
}

impl Reconciler {
    /// Build a reconciler over an index and a validated configuration.
    pub fn new(index: RegistryIndex, config: RunConfig) -> Self {
        Self { index, config }
    }

    /// Reconcile every stop in input order, mutating tags in place.
    pub fn run(&self, stops: &mut [MapStop]) -> RunReport {
        let mut report = RunReport::default();
        report.stats.total = stops.len();
        report.stats.duplicate_registry_refs = self.index.duplicate_count();

        for stop in stops.iter_mut() {
            let outcome = self.reconcile_stop(stop, &mut report);
            report.outcomes.push(outcome);
        }
        report
    }

    /// Find the registry counterpart for a map-side `ref`.
    ///
    /// Map values that already carry the region prefix still match their
    /// bare registry identifier, so re-running over previously corrected
    /// data joins the same records again.
    fn lookup(&self, ref_id: &str) -> Option<&RegistryStop> {
        self.index.get(ref_id).or_else(|| {
            ref_id
                .strip_prefix(self.config.prefix)
                .and_then(|bare| self.index.get(bare))
        })
    }

    fn reconcile_stop(&self, stop: &mut MapStop, report: &mut RunReport) -> MatchOutcome {
        let registry = stop.ref_id.as_deref().and_then(|ref_id| self.lookup(ref_id));
        let Some(registry) = registry else {
            debug!("stop {}: no registry match for ref {:?}", stop.id, stop.ref_id);
            report.stats.unmatched += 1;
            report.unmatched.push(UnmatchedRecord {
                id: stop.id,
                ref_id: stop.ref_id.clone(),
            });
            return MatchOutcome::NoRegistryMatch;
        };

        let ref_id = registry.ref_id.clone();
        let distance_m = haversine_meters(stop.location, registry.location);
        info!(
            "matched ref {ref_id} between map id {} and registry node {} ({distance_m:.1} m)",
            stop.id, registry.node_id
        );

        let exceeded = distance_m > self.config.max_distance_m;
        if exceeded {
            report.stats.distance_exceeded += 1;
            report.distance_exceeded.push(DistanceRecord {
                id: stop.id,
                ref_id: ref_id.clone(),
                distance_m,
                map_lat: stop.location.y,
                map_lon: stop.location.x,
                registry_lat: registry.location.y,
                registry_lon: registry.location.x,
            });
        }

        // The conflict is judged against the tag as it stood before the
        // transformation; the transformer never overwrites an existing value.
        let prior_shelter = stop.tags.get(keys::SHELTER).cloned();

        let changes = transform::apply_tags(stop, registry, &self.config);
        record_changes(&mut report.stats, changes);

        let conflict = shelter_conflict(prior_shelter.as_deref(), registry);
        let conflicted = conflict.is_some();
        if let Some(map_shelter) = conflict {
            report.stats.shelter_conflicts += 1;
            report.shelter_conflicts.push(ShelterConflictRecord {
                id: stop.id,
                ref_id: ref_id.clone(),
                map_shelter,
                registry_shelter: shelter_word(registry.sheltered).to_owned(),
            });
        }

        report.stats.matched += 1;
        if exceeded {
            MatchOutcome::DistanceExceeded { ref_id, distance_m }
        } else if conflicted {
            MatchOutcome::ShelterConflict { ref_id, distance_m }
        } else {
            MatchOutcome::Matched { ref_id, distance_m }
        }
    }
}

/// An existing shelter value that disagrees with the registry flag.
fn shelter_conflict(prior: Option<&str>, registry: &RegistryStop) -> Option<String> {
    let value = prior?;
    (value != shelter_word(registry.sheltered)).then(|| value.to_owned())
}

fn record_changes(stats: &mut RunStats, changes: transform::TagChanges) {
    if changes.prefixed {
        stats.prefixed += 1;
    }
    match changes.shelter_added {
        Some(true) => stats.shelter_added_yes += 1,
        Some(false) => stats.shelter_added_no += 1,
        None => {}
    }
    if changes.named {
        stats.named += 1;
    }
}
