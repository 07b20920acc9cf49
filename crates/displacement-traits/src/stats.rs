//! Small numeric helpers shared across the pipeline.

/// Rounds `value` to `decimals` decimal places, ties to even.
///
/// Exact halves go to the even neighbour, so `12.25` becomes `12.2`.
///
/// # Examples
///
/// ```
/// use displacement_traits::stats::round_to;
///
/// assert_eq!(round_to(12.34, 1), 12.3);
/// assert_eq!(round_to(12.25, 1), 12.2);
/// assert_eq!(round_to(49.999_999_999, 2), 50.0);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Arithmetic mean over the finite values only.
///
/// Returns `None` when no finite value is present, so an absent contribution
/// is never confused with a zero one.
///
/// # Examples
///
/// ```
/// use displacement_traits::stats::mean;
///
/// assert_eq!(mean([1.0, f64::NAN, 3.0]), Some(2.0));
/// assert_eq!(mean(Vec::<f64>::new()), None);
/// ```
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Minimum and maximum over the finite values, if any.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(33.333_333, 1), 33.3);
        assert_relative_eq!(round_to(66.666_666, 1), 66.7);
        assert_relative_eq!(round_to(-1.26, 1), -1.3);
        assert_relative_eq!(round_to(7.0, 2), 7.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(12.25, 1), 12.2);
        assert_eq!(round_to(12.75, 1), 12.8);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(25.25, 1), 25.2);
    }

    #[test]
    fn test_mean_skips_non_finite() {
        assert_eq!(mean([f64::INFINITY, f64::NAN]), None);
        assert_relative_eq!(mean([2.0, 4.0, f64::NAN]).unwrap(), 3.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max([3.0, -1.0, 8.5, f64::NAN]), Some((-1.0, 8.5)));
        assert_eq!(min_max([5.0]), Some((5.0, 5.0)));
        assert_eq!(min_max(Vec::new()), None);
    }
}
