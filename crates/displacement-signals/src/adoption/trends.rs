//! Search interest in displacement-related terms.

use std::collections::BTreeMap;

use displacement_traits::stats::mean;
use displacement_traits::{
    Extraction, Month, MonthlySeries, Quantity, RawSeries, SignalExtractor, SignalId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::points::{monthly_points, monthly_section};

/// Per-point value keys in the `monthly[]` shape.
const MONTHLY_KEYS: &[&str] = &["interest", "value"];

/// Configuration for the trends extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsConfig {
    /// Categories averaged in the per-category shape; empty means all
    pub categories: Vec<String>,
}

/// Monthly search interest on a 0-100 scale.
///
/// Accepts, in order of preference:
/// 1. `monthly[].{date, interest | value}`
/// 2. `aggregate[].{date, interest}`
/// 3. `categories.<name>.composite[].{date, value}`, averaged across
///    categories per month
#[derive(Debug, Clone, Default)]
pub struct TrendsExtractor {
    config: TrendsConfig,
}

impl TrendsExtractor {
    /// Create a new trends extractor with the given configuration.
    #[must_use]
    pub const fn new(config: TrendsConfig) -> Self {
        Self { config }
    }

    fn includes(&self, category: &str) -> bool {
        self.config.categories.is_empty() || self.config.categories.iter().any(|c| c == category)
    }

    fn category_composite(&self, document: &Value, skipped: &mut Vec<String>) -> Option<MonthlySeries> {
        let categories = document.get("categories")?.as_object()?;

        let mut by_month: BTreeMap<Month, Vec<f64>> = BTreeMap::new();
        for (name, category) in categories.iter().filter(|(name, _)| self.includes(name)) {
            let Some(points) = category.get("composite").and_then(Value::as_array) else {
                continue;
            };
            let label = format!("categories.{name}.composite");
            for (month, value) in monthly_points(points, &label, &["value"], skipped) {
                by_month.entry(month).or_default().push(value);
            }
        }

        Some(
            by_month
                .into_iter()
                .filter_map(|(month, values)| mean(values).map(|avg| (month, avg)))
                .collect(),
        )
    }
}

impl SignalExtractor for TrendsExtractor {
    fn id(&self) -> SignalId {
        SignalId::Trends
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();

        let series = monthly_section(document, "monthly", MONTHLY_KEYS, &mut skipped)
            .or_else(|| monthly_section(document, "aggregate", &["interest"], &mut skipped))
            .or_else(|| self.category_composite(document, &mut skipped))
            .unwrap_or_default();

        Extraction::with_skipped(RawSeries::Monthly(series), skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn month(key: &str) -> Month {
        key.parse().unwrap()
    }

    #[test]
    fn test_monthly_shape() {
        let doc = json!({"monthly": [
            {"date": "2023-05", "interest": 42},
            {"date": "2023-06", "value": 44.5}
        ]});
        let extraction = TrendsExtractor::default().extract(&doc);
        let series = extraction.series.as_monthly().unwrap();
        assert_eq!(series[&month("2023-05")], 42.0);
        assert_eq!(series[&month("2023-06")], 44.5);
    }

    #[test]
    fn test_aggregate_shape() {
        let doc = json!({"aggregate": [{"date": "2023-05", "interest": 17}]});
        let extraction = TrendsExtractor::default().extract(&doc);
        assert_eq!(extraction.series.len(), 1);
    }

    #[test]
    fn test_category_composite_is_averaged() {
        let doc = json!({"categories": {
            "ai_replacing_jobs": {"terms": ["AI replacing jobs"], "composite": [
                {"date": "2023-01", "value": 40.0},
                {"date": "2023-02", "value": 50.0}
            ]},
            "ai_tools": {"composite": [
                {"date": "2023-01", "value": 60.0}
            ]},
            "broken": {"raw": []}
        }});

        let extraction = TrendsExtractor::default().extract(&doc);
        let series = extraction.series.as_monthly().unwrap();
        assert_relative_eq!(series[&month("2023-01")], 50.0);
        assert_relative_eq!(series[&month("2023-02")], 50.0);
    }

    #[test]
    fn test_category_filter() {
        let doc = json!({"categories": {
            "a": {"composite": [{"date": "2023-01", "value": 10.0}]},
            "b": {"composite": [{"date": "2023-01", "value": 90.0}]}
        }});
        let extractor = TrendsExtractor::new(TrendsConfig {
            categories: vec!["b".to_string()],
        });
        let extraction = extractor.extract(&doc);
        assert_relative_eq!(extraction.series.as_monthly().unwrap()[&month("2023-01")], 90.0);
    }
}
