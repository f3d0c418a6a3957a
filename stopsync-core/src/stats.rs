//! Aggregate counters for a reconciliation run.

use std::fmt;

/// Immutable summary of one run, suitable for verbose reporting.
///
/// `matched + unmatched` always equals `total`; the diagnostic counters
/// (`shelter_conflicts`, `distance_exceeded`) overlap the matched set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Map stops fed into the run.
    pub total: usize,
    /// Stops joined to a registry record.
    pub matched: usize,
    /// Stops with no `ref` or no registry counterpart.
    pub unmatched: usize,
    /// Matched stops whose existing shelter tag disagrees with the registry.
    pub shelter_conflicts: usize,
    /// Matched stops beyond the distance tolerance.
    pub distance_exceeded: usize,
    /// Stops whose `ref` gained the region prefix.
    pub prefixed: usize,
    /// Stops given `shelter=yes`.
    pub shelter_added_yes: usize,
    /// Stops given `shelter=no`.
    pub shelter_added_no: usize,
    /// Stops that received at least one name tag.
    pub named: usize,
    /// Duplicate identifiers dropped while building the registry index.
    pub duplicate_registry_refs: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results")?;
        writeln!(f, "-------")?;
        writeln!(f, "total stops:            {}", self.total)?;
        writeln!(f, "matched:                {}", self.matched)?;
        writeln!(f, "unmatched:              {}", self.unmatched)?;
        writeln!(f, "shelter conflicts:      {}", self.shelter_conflicts)?;
        writeln!(f, "distance exceeded:      {}", self.distance_exceeded)?;
        writeln!(f, "refs prefixed:          {}", self.prefixed)?;
        writeln!(f, "shelter added (yes):    {}", self.shelter_added_yes)?;
        writeln!(f, "shelter added (no):     {}", self.shelter_added_no)?;
        writeln!(f, "names added:            {}", self.named)?;
        write!(f, "duplicate registry refs: {}", self.duplicate_registry_refs)
    }
}

impl RunStats {
    /// Rows rendered in the `stats.csv` report.
    pub fn rows(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("total", self.total),
            ("matched", self.matched),
            ("unmatched", self.unmatched),
            ("shelter_conflicts", self.shelter_conflicts),
            ("distance_exceeded", self.distance_exceeded),
            ("prefixed", self.prefixed),
            ("shelter_added_yes", self.shelter_added_yes),
            ("shelter_added_no", self.shelter_added_no),
            ("named", self.named),
            ("duplicate_registry_refs", self.duplicate_registry_refs),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_every_counter() {
        let stats = RunStats {
            total: 10,
            matched: 8,
            unmatched: 2,
            ..RunStats::default()
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("total stops:            10"));
        assert!(rendered.contains("matched:                8"));
        assert!(rendered.contains("unmatched:              2"));
    }

    #[test]
    fn rows_cover_all_counters() {
        let stats = RunStats::default();
        assert_eq!(stats.rows().len(), 10);
    }
}
