//! Normalization and combination for the displacement index.
//!
//! This crate turns monthly signal series into composite records:
//! - [`normalize`] scales a raw value onto 0-100 against observed or fixed bounds
//! - [`WeightedCombiner`] sums weighted normalized scores per month
//! - [`Phase`] and [`TrendClassifier`] label each month
//! - [`CompositeScorer`] ties these together over an output window
//!
//! # Examples
//!
//! ```
//! use displacement_combine::{Bounds, Phase, TrendClassifier, normalize};
//! use displacement_traits::Direction;
//!
//! let bounds = Bounds::new(0.0, 900.0).unwrap();
//! let score = normalize(675.0, bounds, Direction::HigherIsWorse);
//! assert_eq!(score, 75.0);
//! assert_eq!(Phase::from_score(score), Phase::Erosion);
//!
//! let trends = TrendClassifier::default().classify_series(&[40.0, 40.3, 39.2]);
//! assert_eq!(trends.last().unwrap().to_string(), "down");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod combiner;
mod composite;
mod definition;
mod normalize;
mod phase;
mod weighted;

// Re-export main types
pub use combiner::{Combiner, SignalScore};
pub use composite::{CompositeRecord, CompositeScorer, NormalizedPoint, ScoredWindow, ScorerConfig};
pub use definition::{SignalDefinition, WEIGHT_TOLERANCE, validate_definitions};
pub use normalize::{Bounds, DEGENERATE_SCORE, RangeNormalizer, RangePolicy, normalize};
pub use phase::{DEFAULT_TREND_DEAD_BAND, Phase, Trend, TrendClassifier};
pub use weighted::WeightedCombiner;
