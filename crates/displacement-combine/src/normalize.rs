//! Min-max scaling onto 0-100.
//!
//! One formula serves both range policies: the policy only decides where the
//! bounds come from. The output is always clamped, so out-of-range raw values
//! saturate at 0 or 100.

use displacement_traits::stats::min_max;
use displacement_traits::{Direction, DisplacementError, MonthlySeries, Result};
use serde::{Deserialize, Serialize};

/// Value returned when the range has zero width.
pub const DEGENERATE_SCORE: f64 = 50.0;

/// Closed interval `[min, max]` a signal is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Bounds {
    /// Creates bounds, rejecting non-finite values and `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DisplacementError::Configuration(format!(
                "range bounds must be finite, got ({min}, {max})"
            )));
        }
        if min > max {
            return Err(DisplacementError::Configuration(format!(
                "range min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Observed bounds of a series, `None` if it has no finite values.
    pub fn observed(series: &MonthlySeries) -> Option<Self> {
        min_max(series.values().copied()).map(|(min, max)| Self { min, max })
    }

    /// Width of the interval.
    pub const fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the interval has zero width, i.e. `max == min` exactly.
    pub const fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Where a signal's bounds come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Min and max of the signal's own extracted series.
    #[default]
    Observed,
    /// Fixed bounds, stable as new data arrives.
    Theoretical {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

impl RangePolicy {
    /// Resolves the policy against a signal's series.
    ///
    /// Observed bounds of an empty series are `None`; theoretical bounds are
    /// always available once validated.
    pub fn resolve(&self, series: &MonthlySeries) -> Result<Option<Bounds>> {
        match *self {
            Self::Observed => Ok(Bounds::observed(series)),
            Self::Theoretical { min, max } => Bounds::new(min, max).map(Some),
        }
    }
}

/// Scales `value` onto 0-100 against `bounds`.
///
/// - higher is worse: `(value - min) / (max - min) * 100`
/// - lower is worse: `(max - value) / (max - min) * 100`
///
/// The result is clamped to `[0, 100]`. A zero-width range yields 50 and a
/// non-finite value yields 0.
///
/// # Examples
///
/// ```
/// use displacement_combine::{Bounds, normalize};
/// use displacement_traits::Direction;
///
/// let bounds = Bounds::new(1350.0, 1620.0).unwrap();
/// assert_eq!(normalize(1620.0, bounds, Direction::LowerIsWorse), 0.0);
/// assert_eq!(normalize(1350.0, bounds, Direction::LowerIsWorse), 100.0);
/// assert_eq!(normalize(2000.0, bounds, Direction::HigherIsWorse), 100.0);
/// ```
pub fn normalize(value: f64, bounds: Bounds, direction: Direction) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if bounds.is_degenerate() {
        return DEGENERATE_SCORE;
    }

    let scaled = match direction {
        Direction::HigherIsWorse => (value - bounds.min) / bounds.span(),
        Direction::LowerIsWorse => (bounds.max - value) / bounds.span(),
    } * 100.0;

    scaled.clamp(0.0, 100.0)
}

/// A resolved normalizer for one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeNormalizer {
    bounds: Bounds,
    direction: Direction,
}

impl RangeNormalizer {
    /// Create a normalizer for the given bounds and direction.
    pub const fn new(bounds: Bounds, direction: Direction) -> Self {
        Self { bounds, direction }
    }

    /// Get the bounds.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get the direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Scales one raw value.
    pub fn apply(&self, value: f64) -> f64 {
        normalize(value, self.bounds, self.direction)
    }
}
