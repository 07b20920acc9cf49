//! Phase labels and month-over-month trend.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Default dead band around the previous score inside which a move is flat.
pub const DEFAULT_TREND_DEAD_BAND: f64 = 0.5;

/// Qualitative stage of displacement for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Scores up to 25.
    #[serde(rename = "Pre-disruption")]
    #[display("Pre-disruption")]
    PreDisruption,
    /// Scores above 25 up to 50.
    #[serde(rename = "Productivity")]
    #[display("Productivity")]
    Productivity,
    /// Scores above 50 up to 75.
    #[serde(rename = "Erosion")]
    #[display("Erosion")]
    Erosion,
    /// Scores above 75.
    #[serde(rename = "Displacement")]
    #[display("Displacement")]
    Displacement,
}

impl Phase {
    /// Classifies a composite score.
    ///
    /// Boundaries are inclusive on the upper side, so 25.0 is still
    /// pre-disruption and 25.1 is productivity.
    ///
    /// # Examples
    ///
    /// ```
    /// use displacement_combine::Phase;
    ///
    /// assert_eq!(Phase::from_score(25.0), Phase::PreDisruption);
    /// assert_eq!(Phase::from_score(25.1), Phase::Productivity);
    /// assert_eq!(Phase::from_score(75.1).range(), "76-100");
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score <= 25.0 {
            Self::PreDisruption
        } else if score <= 50.0 {
            Self::Productivity
        } else if score <= 75.0 {
            Self::Erosion
        } else {
            Self::Displacement
        }
    }

    /// Published score range label of the phase.
    pub const fn range(&self) -> &'static str {
        match self {
            Self::PreDisruption => "0-25",
            Self::Productivity => "26-50",
            Self::Erosion => "51-75",
            Self::Displacement => "76-100",
        }
    }
}

/// Direction of the composite relative to the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Rose by more than the dead band.
    #[display("up")]
    Up,
    /// Fell by more than the dead band.
    #[display("down")]
    Down,
    /// Within the dead band, or the first month.
    #[display("flat")]
    Flat,
}

/// Classifies month-over-month moves with a symmetric dead band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendClassifier {
    dead_band: f64,
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_DEAD_BAND)
    }
}

impl TrendClassifier {
    /// Create a classifier with the given dead band.
    pub const fn new(dead_band: f64) -> Self {
        Self { dead_band }
    }

    /// Get the dead band.
    pub const fn dead_band(&self) -> f64 {
        self.dead_band
    }

    /// Classifies `score` against the previous month's score.
    pub fn classify(&self, previous: Option<f64>, score: f64) -> Trend {
        match previous {
            Some(prev) if score > prev + self.dead_band => Trend::Up,
            Some(prev) if score < prev - self.dead_band => Trend::Down,
            _ => Trend::Flat,
        }
    }

    /// Classifies a chronological score sequence; the first entry is flat.
    pub fn classify_series(&self, scores: &[f64]) -> Vec<Trend> {
        let mut previous = None;
        scores
            .iter()
            .map(|&score| {
                let trend = self.classify(previous, score);
                previous = Some(score);
                trend
            })
            .collect()
    }
}
