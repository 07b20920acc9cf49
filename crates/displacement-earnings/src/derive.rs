//! Per-firm derived metrics.
//!
//! Every metric is `None` when its precondition fails. A firm that does not
//! disclose AI revenue has an unknown AI share, not a zero one.

use displacement_traits::Quarter;
use displacement_traits::stats::round_to;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::FirmQuarterlyRecord;

/// Relabeling index above which a quarter is flagged.
pub const DEFAULT_RELABELING_THRESHOLD: f64 = 3.0;

/// Previous values smaller than this in magnitude yield zero growth.
pub const GROWTH_EPSILON: f64 = 0.01;

/// Total-revenue growth at or below this magnitude counts as flat.
pub const FLAT_GROWTH_EPSILON: f64 = 0.001;

/// Multiplier applied to AI growth when total revenue is flat.
const FLAT_BASE_MULTIPLIER: f64 = 100.0;

/// Configuration for the earnings derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivationConfig {
    /// Relabeling index above which a quarter is flagged (default: 3.0)
    pub relabeling_threshold: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            relabeling_threshold: DEFAULT_RELABELING_THRESHOLD,
        }
    }
}

/// A firm quarter with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuarter {
    /// Firm ticker.
    #[serde(skip)]
    pub ticker: String,
    /// Fiscal quarter.
    pub quarter: Quarter,
    /// Total revenue ($M).
    #[serde(rename = "total_revenue_mm")]
    pub total_revenue: f64,
    /// AI-attributed revenue ($M).
    #[serde(rename = "ai_revenue_mm")]
    pub ai_revenue: Option<f64>,
    /// Reported headcount.
    pub headcount: Option<f64>,
    /// AI revenue as a percentage of total revenue.
    pub ai_pct: Option<f64>,
    /// Revenue per employee per quarter, in thousands of dollars.
    pub revenue_per_employee: Option<f64>,
    /// AI-revenue growth relative to total-revenue growth.
    pub relabeling_index: Option<f64>,
    /// Whether the relabeling index exceeds the threshold.
    pub relabeling_flag: bool,
    /// Fallback taken by the relabeling index, if any.
    #[serde(skip)]
    pub division_hazard: Option<&'static str>,
}

/// Growth rate `(current - previous) / previous`, zero for near-zero bases.
///
/// # Examples
///
/// ```
/// use displacement_earnings::growth_rate;
///
/// assert_eq!(growth_rate(150.0, 100.0), 0.5);
/// assert_eq!(growth_rate(5.0, 0.0), 0.0);
/// ```
pub fn growth_rate(current: f64, previous: f64) -> f64 {
    if previous.abs() < GROWTH_EPSILON {
        return 0.0;
    }
    (current - previous) / previous
}

/// AI revenue as a percentage of total revenue (2 decimals).
pub fn ai_pct(record: &FirmQuarterlyRecord) -> Option<f64> {
    let ai = record.ai_revenue?;
    (record.total_revenue > 0.0).then(|| round_to(ai / record.total_revenue * 100.0, 2))
}

/// Revenue per employee in thousands of dollars per quarter (1 decimal).
///
/// Revenue is reported in millions, hence the `1e6 / 1e3` scaling.
pub fn revenue_per_employee(record: &FirmQuarterlyRecord) -> Option<f64> {
    let headcount = record.headcount.filter(|h| *h > 0.0)?;
    (record.total_revenue > 0.0)
        .then(|| round_to(record.total_revenue * 1_000_000.0 / headcount / 1000.0, 1))
}

/// Relabeling index of `current` against the prior quarter (2 decimals).
///
/// Returns `None` when either quarter lacks an AI revenue figure.
pub fn relabeling_index(
    current: &FirmQuarterlyRecord,
    previous: &FirmQuarterlyRecord,
) -> Option<f64> {
    let (ai, prev_ai) = (current.ai_revenue?, previous.ai_revenue?);

    let ai_growth = growth_rate(ai, prev_ai);
    let total_growth = growth_rate(current.total_revenue, previous.total_revenue);

    let index = if total_growth.abs() > FLAT_GROWTH_EPSILON {
        ai_growth / total_growth
    } else if ai_growth > 0.0 {
        ai_growth * FLAT_BASE_MULTIPLIER
    } else {
        0.0
    };

    Some(round_to(index.max(0.0), 2))
}

/// Names the fallback [`relabeling_index`] takes for this pair of quarters.
///
/// `None` when the index is a plain ratio of growth rates or is not defined.
pub fn division_hazard(
    current: &FirmQuarterlyRecord,
    previous: &FirmQuarterlyRecord,
) -> Option<&'static str> {
    let prev_ai = previous.ai_revenue.filter(|_| current.ai_revenue.is_some())?;

    if prev_ai.abs() < GROWTH_EPSILON {
        Some("near-zero prior AI revenue, AI growth taken as zero")
    } else if previous.total_revenue.abs() < GROWTH_EPSILON {
        Some("near-zero prior total revenue, flat-base fallback")
    } else if growth_rate(current.total_revenue, previous.total_revenue).abs()
        <= FLAT_GROWTH_EPSILON
    {
        Some("flat total revenue, flat-base fallback")
    } else {
        None
    }
}

/// Computes derived metrics for one firm's quarterly history.
#[derive(Debug, Clone, Default)]
pub struct EarningsDerivation {
    config: DerivationConfig,
}

impl EarningsDerivation {
    /// Create a derivation with the given configuration.
    pub const fn new(config: DerivationConfig) -> Self {
        Self { config }
    }

    /// Returns the configured relabeling threshold.
    pub const fn relabeling_threshold(&self) -> f64 {
        self.config.relabeling_threshold
    }

    /// Derives metrics for each quarter of a firm, in chronological order.
    ///
    /// The input does not need to be sorted. The first quarter has no
    /// relabeling index because there is nothing to compare against.
    pub fn derive_firm(&self, records: &[FirmQuarterlyRecord]) -> Vec<DerivedQuarter> {
        let mut ordered: Vec<&FirmQuarterlyRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.quarter);

        let mut derived = Vec::with_capacity(ordered.len());
        for (i, record) in ordered.iter().enumerate() {
            let previous = i.checked_sub(1).map(|prev| ordered[prev]);
            let index = previous.and_then(|prev| relabeling_index(record, prev));
            let hazard = previous.and_then(|prev| division_hazard(record, prev));
            if let Some(hazard) = hazard {
                warn!(ticker = %record.ticker, quarter = %record.quarter, "{hazard}");
            }

            derived.push(DerivedQuarter {
                ticker: record.ticker.clone(),
                quarter: record.quarter,
                total_revenue: record.total_revenue,
                ai_revenue: record.ai_revenue,
                headcount: record.headcount,
                ai_pct: ai_pct(record),
                revenue_per_employee: revenue_per_employee(record),
                relabeling_index: index,
                relabeling_flag: index.is_some_and(|idx| idx > self.config.relabeling_threshold),
                division_hazard: hazard,
            });
        }
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(
        quarter: &str,
        total: f64,
        ai: Option<f64>,
        headcount: Option<f64>,
    ) -> FirmQuarterlyRecord {
        FirmQuarterlyRecord {
            ticker: "ACN".to_string(),
            quarter: quarter.parse().unwrap(),
            total_revenue: total,
            ai_revenue: ai,
            headcount,
        }
    }

    #[test]
    fn test_growth_rate_guards_small_base() {
        assert_relative_eq!(growth_rate(1010.0, 1000.0), 0.01);
        assert_eq!(growth_rate(3.0, 0.009), 0.0);
        assert_eq!(growth_rate(3.0, -0.005), 0.0);
        assert_relative_eq!(growth_rate(-2.0, -1.0), 1.0);
    }

    #[test]
    fn test_ai_pct() {
        assert_eq!(ai_pct(&record("2024-Q1", 1000.0, Some(150.0), None)), Some(15.0));
        assert_eq!(ai_pct(&record("2024-Q1", 1000.0, None, None)), None);
        assert_eq!(ai_pct(&record("2024-Q1", 0.0, Some(10.0), None)), None);
        assert_eq!(ai_pct(&record("2024-Q1", 3.0, Some(1.0), None)), Some(33.33));
    }

    #[test]
    fn test_revenue_per_employee() {
        // 16,000 $M over 738,000 employees = 21.68 $K
        let rpe = revenue_per_employee(&record("2024-Q1", 16_000.0, None, Some(738_000.0)));
        assert_eq!(rpe, Some(21.7));
        assert_eq!(revenue_per_employee(&record("2024-Q1", 16_000.0, None, None)), None);
        assert_eq!(revenue_per_employee(&record("2024-Q1", 16_000.0, None, Some(0.0))), None);
        assert_eq!(revenue_per_employee(&record("2024-Q1", 0.0, None, Some(10.0))), None);
    }

    #[test]
    fn test_relabeling_index_ratio() {
        let prev = record("2024-Q1", 1000.0, Some(100.0), None);
        let curr = record("2024-Q2", 1010.0, Some(150.0), None);
        let idx = relabeling_index(&curr, &prev).unwrap();
        assert_relative_eq!(idx, 50.0);
    }

    #[test]
    fn test_relabeling_index_flat_total_fallback() {
        let prev = record("2024-Q1", 500.0, Some(10.0), None);
        let curr = record("2024-Q2", 500.0, Some(20.0), None);
        assert_relative_eq!(relabeling_index(&curr, &prev).unwrap(), 100.0);

        let shrinking = record("2024-Q2", 500.0, Some(5.0), None);
        assert_eq!(relabeling_index(&shrinking, &prev), Some(0.0));
    }

    #[test]
    fn test_division_hazard() {
        let prev = record("2024-Q1", 500.0, Some(10.0), None);
        let flat = record("2024-Q2", 500.0, Some(20.0), None);
        assert_eq!(division_hazard(&flat, &prev), Some("flat total revenue, flat-base fallback"));

        let growing = record("2024-Q2", 1000.0, Some(20.0), None);
        assert_eq!(division_hazard(&growing, &prev), None);

        let no_ai = record("2024-Q1", 0.005, Some(0.0), None);
        assert_eq!(
            division_hazard(&growing, &no_ai),
            Some("near-zero prior AI revenue, AI growth taken as zero")
        );

        let no_total = record("2024-Q1", 0.0, Some(5.0), None);
        assert_eq!(
            division_hazard(&growing, &no_total),
            Some("near-zero prior total revenue, flat-base fallback")
        );
        // Growth against a zero total base is zero, so the flat branch applies
        assert_relative_eq!(relabeling_index(&growing, &no_total).unwrap(), 300.0);

        let undisclosed = record("2024-Q2", 500.0, None, None);
        assert_eq!(division_hazard(&undisclosed, &prev), None);
    }

    #[test]
    fn test_relabeling_index_is_non_negative() {
        // AI up while total down gives a negative ratio, clamped to zero
        let prev = record("2024-Q1", 1000.0, Some(100.0), None);
        let curr = record("2024-Q2", 900.0, Some(120.0), None);
        assert_eq!(relabeling_index(&curr, &prev), Some(0.0));
    }

    #[test]
    fn test_relabeling_index_requires_ai_revenue() {
        let prev = record("2024-Q1", 1000.0, None, None);
        let curr = record("2024-Q2", 1010.0, Some(150.0), None);
        assert_eq!(relabeling_index(&curr, &prev), None);
        assert_eq!(relabeling_index(&prev, &curr), None);
    }

    #[test]
    fn test_derive_firm() {
        let derivation = EarningsDerivation::default();
        let records = vec![
            record("2024-Q2", 1010.0, Some(150.0), Some(50_000.0)),
            record("2024-Q1", 1000.0, Some(100.0), Some(50_000.0)),
            record("2024-Q3", 1100.0, None, Some(50_000.0)),
        ];

        let derived = derivation.derive_firm(&records);
        assert_eq!(derived.len(), 3);

        // First quarter: no basis for comparison
        assert_eq!(derived[0].quarter.to_string(), "2024-Q1");
        assert_eq!(derived[0].relabeling_index, None);
        assert!(!derived[0].relabeling_flag);
        assert_eq!(derived[0].division_hazard, None);
        assert_eq!(derived[0].ai_pct, Some(10.0));
        assert_eq!(derived[0].revenue_per_employee, Some(20.0));

        assert_relative_eq!(derived[1].relabeling_index.unwrap(), 50.0);
        assert!(derived[1].relabeling_flag);

        // AI revenue not disclosed
        assert_eq!(derived[2].relabeling_index, None);
        assert!(!derived[2].relabeling_flag);
        assert_eq!(derived[2].ai_pct, None);
        assert_eq!(derived[2].revenue_per_employee, Some(22.0));
    }

    #[test]
    fn test_custom_threshold() {
        let derivation = EarningsDerivation::new(DerivationConfig {
            relabeling_threshold: 60.0,
        });
        assert_relative_eq!(derivation.relabeling_threshold(), 60.0);

        let records = vec![
            record("2024-Q1", 1000.0, Some(100.0), None),
            record("2024-Q2", 1010.0, Some(150.0), None),
        ];
        let derived = derivation.derive_firm(&records);
        assert!(!derived[1].relabeling_flag);
    }

    #[test]
    fn test_flag_requires_index_above_threshold() {
        // AI growth 3% over total growth 1% gives exactly 3.0
        let records = vec![
            record("2024-Q1", 1000.0, Some(100.0), None),
            record("2024-Q2", 1010.0, Some(103.0), None),
        ];
        let derived = EarningsDerivation::default().derive_firm(&records);
        assert_eq!(derived[1].relabeling_index, Some(3.0));
        assert!(!derived[1].relabeling_flag);

        let records = vec![
            record("2024-Q1", 1000.0, Some(100.0), None),
            record("2024-Q2", 1010.0, Some(103.1), None),
        ];
        let derived = EarningsDerivation::default().derive_firm(&records);
        assert_eq!(derived[1].relabeling_index, Some(3.1));
        assert!(derived[1].relabeling_flag);
    }

    #[test]
    fn test_derive_firm_records_hazard() {
        let records = vec![
            record("2024-Q1", 500.0, Some(10.0), None),
            record("2024-Q2", 500.0, Some(20.0), None),
        ];
        let derived = EarningsDerivation::default().derive_firm(&records);
        assert_relative_eq!(derived[1].relabeling_index.unwrap(), 100.0);
        assert!(derived[1].division_hazard.is_some());
    }

    #[test]
    fn test_derive_empty() {
        assert!(EarningsDerivation::default().derive_firm(&[]).is_empty());
    }
}
