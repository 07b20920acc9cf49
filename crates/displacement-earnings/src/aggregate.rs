//! Cross-firm aggregation per quarter.

use std::collections::BTreeMap;

use displacement_traits::stats::{mean, round_to};
use displacement_traits::{Quarter, QuarterlySeries};
use serde::{Deserialize, Serialize};

use crate::derive::DerivedQuarter;

/// Per-quarter aggregate over all firms.
///
/// Averages only include firms with a value for that quarter; a firm with a
/// null metric is left out of both the sum and the divisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// Fiscal quarter.
    pub quarter: Quarter,
    /// Sum of disclosed AI revenue ($M), `None` if no firm disclosed any.
    #[serde(rename = "total_ai_revenue_mm")]
    pub total_ai_revenue: Option<f64>,
    /// Mean AI share of revenue (%).
    pub avg_ai_pct: Option<f64>,
    /// Mean relabeling index.
    pub avg_relabeling_index: Option<f64>,
    /// Mean revenue per employee ($K per quarter).
    pub avg_rev_per_employee: Option<f64>,
    /// Number of firms flagged for relabeling.
    pub firms_flagged_relabeling: usize,
}

#[derive(Default)]
struct QuarterBucket<'a> {
    quarters: Vec<&'a DerivedQuarter>,
}

/// Aggregates derived firm histories into one record per quarter.
///
/// Quarters are the sorted union over all firms, so a firm missing a quarter
/// simply does not contribute to it.
pub fn aggregate(firms: &[Vec<DerivedQuarter>]) -> Vec<AggregateRecord> {
    let mut buckets: BTreeMap<Quarter, QuarterBucket<'_>> = BTreeMap::new();
    for derived in firms.iter().flatten() {
        buckets.entry(derived.quarter).or_default().quarters.push(derived);
    }

    buckets
        .into_iter()
        .map(|(quarter, bucket)| {
            let rows = &bucket.quarters;
            let disclosed: Vec<f64> = rows.iter().filter_map(|q| q.ai_revenue).collect();

            AggregateRecord {
                quarter,
                total_ai_revenue: (!disclosed.is_empty()).then(|| disclosed.iter().sum()),
                avg_ai_pct: mean(rows.iter().filter_map(|q| q.ai_pct)).map(|v| round_to(v, 1)),
                avg_relabeling_index: mean(rows.iter().filter_map(|q| q.relabeling_index))
                    .map(|v| round_to(v, 1)),
                avg_rev_per_employee: mean(rows.iter().filter_map(|q| q.revenue_per_employee))
                    .map(|v| round_to(v, 1)),
                firms_flagged_relabeling: rows.iter().filter(|q| q.relabeling_flag).count(),
            }
        })
        .collect()
}

/// Projects the average revenue per employee into a quarterly series.
pub fn rev_per_employee_series(records: &[AggregateRecord]) -> QuarterlySeries {
    records
        .iter()
        .filter_map(|r| r.avg_rev_per_employee.map(|v| (r.quarter, v)))
        .collect()
}
