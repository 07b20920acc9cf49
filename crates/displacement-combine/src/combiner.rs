//! Core trait definition for signal combiners.

use displacement_traits::{Result, SignalId};
use ndarray::Array1;

/// Normalized scores of a single signal across the output window.
///
/// Element `i` is the signal's 0-100 score for the `i`-th month.
#[derive(Debug, Clone)]
pub struct SignalScore {
    /// Signal identifier
    pub id: SignalId,

    /// Normalized score per month
    pub scores: Array1<f64>,
}

/// Combines per-signal normalized scores into one composite per month.
///
/// All implementations must be thread-safe (Send + Sync).
///
/// # Examples
///
/// ```
/// use displacement_combine::{Combiner, SignalScore};
/// use displacement_traits::SignalId;
/// use ndarray::Array1;
///
/// struct MaxCombiner;
///
/// impl Combiner for MaxCombiner {
///     fn combine(&self, signals: &[SignalScore]) -> displacement_traits::Result<Array1<f64>> {
///         let months = signals.first().map_or(0, |s| s.scores.len());
///         Ok(Array1::from_shape_fn(months, |i| {
///             signals.iter().map(|s| s.scores[i]).fold(0.0, f64::max)
///         }))
///     }
///
///     fn name(&self) -> &str {
///         "max"
///     }
/// }
///
/// let signals = vec![SignalScore { id: SignalId::Trends, scores: Array1::from_vec(vec![10.0, 70.0]) }];
/// assert_eq!(MaxCombiner.combine(&signals).unwrap()[1], 70.0);
/// ```
pub trait Combiner: Send + Sync {
    /// Combine multiple signals into a composite vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No signals provided
    /// - Signal vectors have mismatched lengths
    /// - Combination produces non-finite values
    fn combine(&self, signals: &[SignalScore]) -> Result<Array1<f64>>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

/// Checks that `signals` is non-empty and length-aligned; returns the length.
pub(crate) fn aligned_len(signals: &[SignalScore]) -> Result<usize> {
    let first = signals.first().ok_or("Cannot combine zero signals")?;
    let months = first.scores.len();

    for signal in signals {
        if signal.scores.len() != months {
            return Err(format!(
                "Signal '{}' has {} months, expected {}",
                signal.id,
                signal.scores.len(),
                months
            )
            .into());
        }
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_score_creation() {
        let score = SignalScore {
            id: SignalId::Github,
            scores: Array1::from_vec(vec![0.5, 20.0, 100.0]),
        };

        assert_eq!(score.id, SignalId::Github);
        assert_eq!(score.scores.len(), 3);
    }

    #[test]
    fn test_aligned_len() {
        let a = SignalScore {
            id: SignalId::Trends,
            scores: Array1::zeros(3),
        };
        let b = SignalScore {
            id: SignalId::Github,
            scores: Array1::zeros(2),
        };
        assert_eq!(aligned_len(std::slice::from_ref(&a)).unwrap(), 3);
        assert!(aligned_len(&[a, b]).unwrap_err().to_string().contains("github"));
        assert!(aligned_len(&[]).is_err());
    }
}
