//! Run configuration: region predicate, distance tolerance, prefix rule.

use std::fmt;

use geo::{Coord, Rect};
use thiserror::Error;

/// Default proximity tolerance between a map stop and its registry match.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 100.0;

/// Default letter prepended to `ref` values inside the region.
pub const DEFAULT_PREFIX: char = 'H';

/// Geographic test selecting stops within the prefixing zone.
pub trait RegionPredicate {
    /// Whether the coordinate (`x = longitude`, `y = latitude`) lies inside
    /// the region.
    fn contains(&self, location: Coord<f64>) -> bool;
}

impl<F> RegionPredicate for F
where
    F: Fn(Coord<f64>) -> bool,
{
    fn contains(&self, location: Coord<f64>) -> bool {
        self(location)
    }
}

/// Axis-aligned bounding-box region.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopsync_core::{BoundingBoxRegion, RegionPredicate};
///
/// let helsinki = BoundingBoxRegion::helsinki();
/// assert!(helsinki.contains(Coord { x: 24.94, y: 60.17 }));
/// assert!(!helsinki.contains(Coord { x: 23.76, y: 61.50 }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxRegion {
    bounds: Rect<f64>,
}

impl BoundingBoxRegion {
    /// Build a region from two opposite corners, in any order.
    pub fn new(corner_a: Coord<f64>, corner_b: Coord<f64>) -> Self {
        Self {
            bounds: Rect::new(corner_a, corner_b),
        }
    }

    /// Stock bounding box around the Helsinki municipal area.
    pub fn helsinki() -> Self {
        Self::new(
            Coord { x: 24.82, y: 60.10 },
            Coord { x: 25.26, y: 60.31 },
        )
    }
}

impl RegionPredicate for BoundingBoxRegion {
    fn contains(&self, location: Coord<f64>) -> bool {
        let min = self.bounds.min();
        let max = self.bounds.max();
        (min.x..=max.x).contains(&location.x) && (min.y..=max.y).contains(&location.y)
    }
}

/// Errors raised when validating a [`RunConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The distance tolerance was not a positive, finite number of metres.
    #[error("maximum match distance must be positive and finite, got {value}")]
    InvalidMaxDistance {
        /// Rejected value.
        value: f64,
    },
    /// The prefix letter was not alphanumeric.
    #[error("ref prefix must be alphanumeric, got {value:?}")]
    InvalidPrefix {
        /// Rejected value.
        value: char,
    },
}

/// Configuration for a single reconciliation run.
pub struct RunConfig {
    /// Region within which `ref` values receive the prefix.
    pub region: Box<dyn RegionPredicate>,
    /// Maximum accepted distance between a map stop and its registry match.
    pub max_distance_m: f64,
    /// Letter prepended to in-region `ref` values.
    pub prefix: char,
}

impl RunConfig {
    /// Validate and construct a `RunConfig`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the tolerance is non-positive or
    /// non-finite, or the prefix letter is not alphanumeric.
    pub fn new(
        region: Box<dyn RegionPredicate>,
        max_distance_m: f64,
        prefix: char,
    ) -> Result<Self, ConfigError> {
        if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
            return Err(ConfigError::InvalidMaxDistance {
                value: max_distance_m,
            });
        }
        if !prefix.is_alphanumeric() {
            return Err(ConfigError::InvalidPrefix { value: prefix });
        }
        Ok(Self {
            region,
            max_distance_m,
            prefix,
        })
    }

    /// Stock configuration: Helsinki bounding box, 100 m tolerance, `H`.
    pub fn helsinki() -> Self {
        Self {
            region: Box::new(BoundingBoxRegion::helsinki()),
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            prefix: DEFAULT_PREFIX,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("region", &"<predicate>")
            .field("max_distance_m", &self.max_distance_m)
            .field("prefix", &self.prefix)
            .finish()
    }
}
