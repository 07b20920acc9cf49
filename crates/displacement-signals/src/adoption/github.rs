//! Open-source AI activity.

use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
use serde_json::Value;

use crate::points::monthly_section;

/// Per-point value keys, in probe order.
const ACTIVITY_KEYS: &[&str] = &["activity_index", "stars"];

/// Per-point value keys in the collector's `aggregate[]` totals.
const AGGREGATE_KEYS: &[&str] = &["activity_index", "total_stars"];

/// Monthly GitHub activity.
///
/// Reads `monthly[].{date, activity_index | stars}`, falling back to the
/// collector's cross-category totals in `aggregate[].{date, total_stars}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubExtractor;

impl SignalExtractor for GithubExtractor {
    fn id(&self) -> SignalId {
        SignalId::Github
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();
        let series = monthly_section(document, "monthly", ACTIVITY_KEYS, &mut skipped)
            .or_else(|| monthly_section(document, "aggregate", AGGREGATE_KEYS, &mut skipped))
            .unwrap_or_default();
        Extraction::with_skipped(RawSeries::Monthly(series), skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use displacement_traits::Month;
    use serde_json::json;

    #[test]
    fn test_activity_index_preferred_over_stars() {
        let doc = json!({"monthly": [
            {"date": "2024-01", "activity_index": 61.2, "stars": 90000},
            {"date": "2024-02", "stars": 95000}
        ]});
        let extraction = GithubExtractor.extract(&doc);
        let series = extraction.series.as_monthly().unwrap();
        assert_eq!(series[&Month::new(2024, 1).unwrap()], 61.2);
        assert_eq!(series[&Month::new(2024, 2).unwrap()], 95000.0);
    }

    #[test]
    fn test_collector_aggregate_shape() {
        let doc = json!({
            "categories": {"llm_frameworks": {"data": []}},
            "aggregate": [
                {"date": "2024-01", "new_repos": 120, "total_stars": 15000, "contributors": 800}
            ]
        });
        let extraction = GithubExtractor.extract(&doc);
        assert_eq!(
            extraction.series.as_monthly().unwrap()[&Month::new(2024, 1).unwrap()],
            15000.0
        );
    }
}
