//! Monthly composite scoring.
//!
//! For every month of the window and every signal: normalize the raw value
//! if there is one, otherwise record the fallback raw value with a zero
//! normalized score. Weighted components are summed into the score, which
//! is then labeled with a phase and a trend.

use std::collections::BTreeMap;

use displacement_traits::stats::round_to;
use displacement_traits::{DisplacementError, Month, MonthlySeries, Result, SignalId};
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combiner::SignalScore;
use crate::definition::{SignalDefinition, validate_definitions};
use crate::normalize::{Bounds, RangeNormalizer};
use crate::phase::{DEFAULT_TREND_DEAD_BAND, Phase, Trend, TrendClassifier};
use crate::weighted::WeightedCombiner;

/// Decimals kept on normalized component values.
const NORMALIZED_DECIMALS: i32 = 1;

/// Decimals kept on weighted component values.
const WEIGHTED_DECIMALS: i32 = 2;

/// Decimals kept on the composite score.
const SCORE_DECIMALS: i32 = 1;

/// Configuration for the composite scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Raw value recorded for a month with no data (default: 0.0)
    pub fallback_raw_value: f64,

    /// Month-over-month change treated as flat (default: 0.5)
    pub trend_dead_band: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            fallback_raw_value: 0.0,
            trend_dead_band: DEFAULT_TREND_DEAD_BAND,
        }
    }
}

/// One signal's contribution to one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Raw value, or the fallback when the month has no data
    pub raw_value: f64,
    /// Normalized value in `[0, 100]`
    pub normalized: f64,
    /// `normalized * weight`
    pub weighted: f64,
}

/// Composite score for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRecord {
    /// Month
    pub date: Month,
    /// Composite score in `[0, 100]`
    pub score: f64,
    /// Phase label
    pub phase: Phase,
    /// Phase range label, e.g. `"26-50"`
    pub phase_range: String,
    /// Per-signal breakdown
    pub components: BTreeMap<SignalId, NormalizedPoint>,
    /// Direction relative to the previous month
    pub trend: Trend,
}

/// Records for a window plus the bounds each signal was normalized against.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWindow {
    /// One record per month, chronological
    pub records: Vec<CompositeRecord>,
    /// Resolved bounds; a signal with no data under an observed range is absent
    pub bounds: BTreeMap<SignalId, Bounds>,
}

/// Turns monthly signal series into composite records.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use displacement_combine::{CompositeScorer, RangePolicy, ScorerConfig, SignalDefinition};
/// use displacement_traits::{Direction, Month, SignalId};
///
/// let definitions: Vec<SignalDefinition> = SignalId::ALL
///     .into_iter()
///     .map(|id| SignalDefinition {
///         id,
///         weight: if id == SignalId::Trends { 1.0 } else { 0.0 },
///         direction: Direction::HigherIsWorse,
///         range: RangePolicy::Theoretical { min: 0.0, max: 100.0 },
///     })
///     .collect();
/// let scorer = CompositeScorer::new(definitions, ScorerConfig::default()).unwrap();
///
/// let month = Month::new(2024, 1).unwrap();
/// let series = BTreeMap::from([(SignalId::Trends, BTreeMap::from([(month, 62.0)]))]);
///
/// let window = scorer.score(&[month], &series).unwrap();
/// assert_eq!(window.records[0].score, 62.0);
/// assert_eq!(window.records[0].phase_range, "51-75");
/// ```
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    definitions: Vec<SignalDefinition>,
    config: ScorerConfig,
    combiner: WeightedCombiner,
    trend: TrendClassifier,
}

impl CompositeScorer {
    /// Create a scorer, validating definitions and configuration.
    pub fn new(definitions: Vec<SignalDefinition>, config: ScorerConfig) -> Result<Self> {
        validate_definitions(&definitions)?;
        if !config.fallback_raw_value.is_finite() {
            return Err(DisplacementError::Configuration(
                "fallback raw value must be finite".to_string(),
            ));
        }
        if !config.trend_dead_band.is_finite() || config.trend_dead_band < 0.0 {
            return Err(DisplacementError::Configuration(format!(
                "trend dead band must be a non-negative number, got {}",
                config.trend_dead_band
            )));
        }

        let weights = definitions.iter().map(|d| (d.id, d.weight)).collect();
        Ok(Self {
            definitions,
            config,
            combiner: WeightedCombiner::new(weights).with_rounding(WEIGHTED_DECIMALS),
            trend: TrendClassifier::new(config.trend_dead_band),
        })
    }

    /// Get the signal definitions, in the order given.
    pub fn definitions(&self) -> &[SignalDefinition] {
        &self.definitions
    }

    /// Weights keyed by signal.
    pub fn weights(&self) -> BTreeMap<SignalId, f64> {
        self.definitions.iter().map(|d| (d.id, d.weight)).collect()
    }

    /// Scores every month of `months`.
    ///
    /// `months` must be non-empty and strictly increasing. Signals missing
    /// from `series` are treated as having no data at all.
    pub fn score(
        &self,
        months: &[Month],
        series: &BTreeMap<SignalId, MonthlySeries>,
    ) -> Result<ScoredWindow> {
        if months.is_empty() {
            return Err(DisplacementError::Configuration(
                "output window is empty".to_string(),
            ));
        }
        if let Some(pair) = months.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(DisplacementError::Configuration(format!(
                "output window is not chronological at {} -> {}",
                pair[0], pair[1]
            )));
        }

        let empty = MonthlySeries::new();
        let mut bounds = BTreeMap::new();
        let mut raw_columns = Vec::with_capacity(self.definitions.len());
        let mut scores = Vec::with_capacity(self.definitions.len());

        for definition in &self.definitions {
            let signal = series.get(&definition.id).unwrap_or(&empty);
            let resolved = definition.range.resolve(signal)?;
            let normalizer = resolved.map(|b| RangeNormalizer::new(b, definition.direction));

            if let Some(b) = resolved {
                debug!(
                    signal = %definition.id,
                    min = b.min,
                    max = b.max,
                    direction = %definition.direction,
                    "resolved normalization bounds"
                );
                bounds.insert(definition.id, b);
            }

            let mut raw = Vec::with_capacity(months.len());
            let mut normalized = Vec::with_capacity(months.len());
            for month in months {
                match (signal.get(month), &normalizer) {
                    (Some(&value), Some(normalizer)) => {
                        raw.push(value);
                        normalized.push(round_to(normalizer.apply(value), NORMALIZED_DECIMALS));
                    }
                    _ => {
                        raw.push(self.config.fallback_raw_value);
                        normalized.push(0.0);
                    }
                }
            }

            raw_columns.push(raw);
            scores.push(SignalScore {
                id: definition.id,
                scores: Array1::from_vec(normalized),
            });
        }

        let weighted = self.combiner.weighted(&scores)?;
        let totals = weighted.sum_axis(Axis(1));
        let composite: Vec<f64> = totals.iter().map(|t| round_to(*t, SCORE_DECIMALS)).collect();
        let trends = self.trend.classify_series(&composite);

        let records = months
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let components = self
                    .definitions
                    .iter()
                    .enumerate()
                    .map(|(j, definition)| {
                        let point = NormalizedPoint {
                            raw_value: raw_columns[j][i],
                            normalized: scores[j].scores[i],
                            weighted: weighted[[i, j]],
                        };
                        (definition.id, point)
                    })
                    .collect();

                let phase = Phase::from_score(composite[i]);
                CompositeRecord {
                    date: *month,
                    score: composite[i],
                    phase,
                    phase_range: phase.range().to_string(),
                    components,
                    trend: trends[i],
                }
            })
            .collect();

        Ok(ScoredWindow { records, bounds })
    }
}
