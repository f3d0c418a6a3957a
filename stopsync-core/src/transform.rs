//! Conditional tag transformations applied to matched stops.

use log::info;

use crate::config::RunConfig;
use crate::stop::{MapStop, RegistryStop, keys, shelter_word};

/// Which transformation rules fired for one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TagChanges {
    /// The `ref` value gained the region prefix.
    pub(crate) prefixed: bool,
    /// A `shelter` tag was added, with the value it was given.
    pub(crate) shelter_added: Option<bool>,
    /// At least one name tag was filled in.
    pub(crate) named: bool,
}

/// Apply the tag rules to a matched stop, mutating its tags in place.
///
/// Rules, per the non-destructive default policy:
/// - `ref` gains the configured prefix when the stop lies inside the region
///   and the value does not already start with it (idempotent);
/// - `shelter` is filled from the registry only when absent;
/// - `name`, `name:fi` and `name:sv` are filled from the registry only when
///   absent or empty, and only with non-empty registry names. `name` and
///   `name:fi` take the Finnish name, `name:sv` the Swedish.
pub(crate) fn apply_tags(
    stop: &mut MapStop,
    registry: &RegistryStop,
    config: &RunConfig,
) -> TagChanges {
    let mut changes = TagChanges::default();

    if config.region.contains(stop.location) {
        changes.prefixed = prefix_ref(stop, config.prefix);
    }

    if !stop.tags.contains_key(keys::SHELTER) {
        let word = shelter_word(registry.sheltered);
        stop.tags.insert(keys::SHELTER.to_owned(), word.to_owned());
        changes.shelter_added = Some(registry.sheltered);
        info!("stop {}: added shelter={word}", stop.id);
    }

    for (key, value) in [
        (keys::NAME, &registry.name_fi),
        (keys::NAME_FI, &registry.name_fi),
        (keys::NAME_SV, &registry.name_sv),
    ] {
        if value.is_empty() {
            continue;
        }
        if stop.tags.get(key).is_none_or(String::is_empty) {
            stop.tags.insert(key.to_owned(), value.clone());
            changes.named = true;
            info!("stop {}: added {key}={value}", stop.id);
        }
    }

    changes
}

/// Prepend the prefix to the stop's `ref`, both in the tag map and in
/// `ref_id`. Returns whether anything changed.
fn prefix_ref(stop: &mut MapStop, prefix: char) -> bool {
    let Some(current) = stop.tags.get(keys::REF) else {
        return false;
    };
    if current.starts_with(prefix) {
        return false;
    }
    let updated = format!("{prefix}{current}");
    info!("stop {}: ref {current} -> {updated}", stop.id);
    stop.tags.insert(keys::REF.to_owned(), updated.clone());
    stop.ref_id = Some(updated);
    true
}
