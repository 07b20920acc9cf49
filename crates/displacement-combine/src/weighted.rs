//! Fixed-weight linear combination.

use std::collections::BTreeMap;

use displacement_traits::stats::round_to;
use displacement_traits::{DisplacementError, Result, SignalId};
use ndarray::{Array1, Array2, Axis};

use crate::combiner::{Combiner, SignalScore, aligned_len};

/// Combiner computing `sum_j weight_j * score_j` per month.
///
/// Scores are laid out as a months × signals matrix and scaled column-wise
/// by the weight vector. Each weighted contribution can be rounded before
/// summation so that published components add up to the published total.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use displacement_combine::{Combiner, SignalScore, WeightedCombiner};
/// use displacement_traits::SignalId;
/// use ndarray::Array1;
///
/// let weights = BTreeMap::from([(SignalId::Trends, 0.75), (SignalId::Github, 0.25)]);
/// let combiner = WeightedCombiner::new(weights);
///
/// let signals = vec![
///     SignalScore { id: SignalId::Trends, scores: Array1::from_vec(vec![50.0, 100.0]) },
///     SignalScore { id: SignalId::Github, scores: Array1::from_vec(vec![0.0, 100.0]) },
/// ];
///
/// let composite = combiner.combine(&signals).unwrap();
/// assert_eq!(composite.to_vec(), vec![37.5, 100.0]);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedCombiner {
    weights: BTreeMap<SignalId, f64>,
    decimals: Option<i32>,
}

impl WeightedCombiner {
    /// Create a combiner with the given weights and no intermediate rounding.
    pub const fn new(weights: BTreeMap<SignalId, f64>) -> Self {
        Self {
            weights,
            decimals: None,
        }
    }

    /// Round each weighted contribution to `decimals` places.
    #[must_use]
    pub fn with_rounding(mut self, decimals: i32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Weight of a signal, if it has one.
    pub fn weight(&self, id: SignalId) -> Option<f64> {
        self.weights.get(&id).copied()
    }

    /// Weighted contributions as a months × signals matrix.
    ///
    /// Column `j` corresponds to `signals[j]`.
    pub fn weighted(&self, signals: &[SignalScore]) -> Result<Array2<f64>> {
        let months = aligned_len(signals)?;

        let weights = signals
            .iter()
            .map(|s| {
                self.weight(s.id).ok_or_else(|| {
                    DisplacementError::Configuration(format!("no weight for signal '{}'", s.id))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let mut matrix: Array2<f64> = Array2::zeros((months, signals.len()));
        for (j, signal) in signals.iter().enumerate() {
            matrix.column_mut(j).assign(&signal.scores);
        }

        let mut weighted = matrix * &Array1::from_vec(weights);
        if let Some(decimals) = self.decimals {
            weighted.mapv_inplace(|x| round_to(x, decimals));
        }
        Ok(weighted)
    }
}

impl Combiner for WeightedCombiner {
    fn combine(&self, signals: &[SignalScore]) -> Result<Array1<f64>> {
        let composite = self.weighted(signals)?.sum_axis(Axis(1));

        if composite.iter().any(|x| !x.is_finite()) {
            return Err("Combination produced non-finite values".into());
        }

        Ok(composite)
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn score(id: SignalId, values: &[f64]) -> SignalScore {
        SignalScore {
            id,
            scores: Array1::from_vec(values.to_vec()),
        }
    }

    #[test]
    fn test_weighted_matrix_layout() {
        let combiner = WeightedCombiner::new(BTreeMap::from([
            (SignalId::Employment, 0.25),
            (SignalId::Regulatory, 0.05),
        ]));
        let signals = [
            score(SignalId::Employment, &[100.0, 40.0, 0.0]),
            score(SignalId::Regulatory, &[10.0, 20.0, 30.0]),
        ];

        let weighted = combiner.weighted(&signals).unwrap();
        assert_eq!(weighted.dim(), (3, 2));
        assert_relative_eq!(weighted[[0, 0]], 25.0);
        assert_relative_eq!(weighted[[1, 0]], 10.0);
        assert_relative_eq!(weighted[[2, 1]], 1.5);
    }

    #[test]
    fn test_rounding_before_summation() {
        let combiner = WeightedCombiner::new(BTreeMap::from([
            (SignalId::Trends, 0.5),
            (SignalId::Github, 0.5),
        ]))
        .with_rounding(2);
        // 24.6912 * 0.5 = 12.3456 -> 12.35 per column
        let signals = [
            score(SignalId::Trends, &[24.6912]),
            score(SignalId::Github, &[24.6912]),
        ];
        let composite = combiner.combine(&signals).unwrap();
        assert_relative_eq!(composite[0], 24.7, epsilon = 1e-9);
        assert_eq!(combiner.name(), "weighted");
    }

    #[test]
    fn test_missing_weight() {
        let combiner = WeightedCombiner::new(BTreeMap::from([(SignalId::Trends, 1.0)]));
        let err = combiner
            .combine(&[score(SignalId::Github, &[1.0])])
            .unwrap_err();
        assert!(matches!(err, DisplacementError::Configuration(_)));
    }

    #[test]
    fn test_mismatched_lengths() {
        let combiner = WeightedCombiner::new(BTreeMap::from([
            (SignalId::Trends, 0.5),
            (SignalId::Github, 0.5),
        ]));
        let signals = [
            score(SignalId::Trends, &[1.0, 2.0]),
            score(SignalId::Github, &[1.0]),
        ];
        assert!(combiner.combine(&signals).is_err());
        assert!(combiner.combine(&[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let combiner = WeightedCombiner::new(BTreeMap::from([(SignalId::Trends, 1.0)]));
        assert!(combiner.combine(&[score(SignalId::Trends, &[f64::NAN])]).is_err());
    }
}
