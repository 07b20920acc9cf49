//! Revenue per employee across IT-services firms.

use displacement_earnings::{DerivationConfig, EarningsDerivation, EarningsDocument, normalize_document};
use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::points::quarterly_section;

/// Configuration for the revenue-per-employee extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevPerEmployeeConfig {
    /// Derivation applied when the document carries raw firm filings
    pub derivation: DerivationConfig,
}

/// Quarterly average revenue per employee, in thousands of dollars.
///
/// When the document has a `firms` map (raw filings or an already-normalized
/// earnings document) the metric is derived per firm and averaged across
/// firms. Otherwise `aggregate[].avg_rev_per_employee` is read as-is.
///
/// Revenue per employee is a level, so each quarter's value holds for all
/// three of its months.
#[derive(Debug, Clone, Default)]
pub struct RevPerEmployeeExtractor {
    derivation: EarningsDerivation,
}

impl RevPerEmployeeExtractor {
    /// Create a new extractor with the given configuration.
    #[must_use]
    pub const fn new(config: RevPerEmployeeConfig) -> Self {
        Self {
            derivation: EarningsDerivation::new(config.derivation),
        }
    }
}

impl SignalExtractor for RevPerEmployeeExtractor {
    fn id(&self) -> SignalId {
        SignalId::RevPerEmployee
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        if EarningsDocument::has_firms(document) {
            let (normalized, skipped) = normalize_document(document, &self.derivation);
            debug!(
                firms = normalized.firms.len(),
                quarters = normalized.aggregate.len(),
                "derived revenue per employee from firm filings"
            );
            return Extraction {
                series: RawSeries::Quarterly(normalized.rev_per_employee()),
                skipped,
                hazards: normalized.hazards(),
            };
        }

        let mut skipped = Vec::new();
        let series =
            quarterly_section(document, "aggregate", &["avg_rev_per_employee"], &mut skipped)
                .unwrap_or_default();
        Extraction::with_skipped(RawSeries::Quarterly(series), skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::ExtractMonthly;
    use displacement_traits::{Month, Quarter};
    use serde_json::json;

    #[test]
    fn test_derives_from_firms() {
        let doc = json!({"firms": {
            "ACN": {"name": "Accenture", "quarterly": [
                {"quarter": "2024-Q1", "total_revenue_mm": 1000.0, "headcount": 40000},
                {"quarter": "2024-Q2", "total_revenue_mm": 1200.0, "headcount": 40000}
            ]},
            "INFY": {"name": "Infosys", "quarterly": [
                {"quarter": "2024-Q1", "total_revenue_mm": 500.0, "headcount": 25000}
            ]}
        }});

        let extraction = RevPerEmployeeExtractor::default().extract(&doc);
        let series = extraction.series.as_quarterly().unwrap();
        assert_eq!(series[&Quarter::new(2024, 1).unwrap()], 22.5);
        assert_eq!(series[&Quarter::new(2024, 2).unwrap()], 30.0);
    }

    #[test]
    fn test_flat_base_fallback_is_reported() {
        let doc = json!({"firms": {"ACN": {"name": "Accenture", "quarterly": [
            {"quarter": "2024-Q1", "total_revenue_mm": 500.0, "ai_revenue_mm": 10.0, "headcount": 20000},
            {"quarter": "2024-Q2", "total_revenue_mm": 500.0, "ai_revenue_mm": 20.0, "headcount": 20000}
        ]}}});
        let extraction = RevPerEmployeeExtractor::default().extract(&doc);
        assert_eq!(extraction.hazards.len(), 1);
        assert!(extraction.hazards[0].starts_with("firms.ACN.2024-Q2"));

        let monthly = RevPerEmployeeExtractor::default().monthly(Some(&doc));
        assert_eq!(monthly.hazards, extraction.hazards);
    }

    #[test]
    fn test_reads_aggregate_when_no_firms() {
        let doc = json!({"aggregate": [
            {"quarter": "2023-Q4", "avg_rev_per_employee": 21.7},
            {"quarter": "2024-Q1", "avg_rev_per_employee": null}
        ]});
        let extractor = RevPerEmployeeExtractor::default();
        let extraction = extractor.extract(&doc);
        assert_eq!(extraction.series.len(), 1);
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extractor.quantity(), Quantity::Level);

        let monthly = extractor.monthly(Some(&doc));
        let values: Vec<f64> = monthly.series.values().copied().collect();
        assert_eq!(values, [21.7, 21.7, 21.7]);
        assert!(monthly.series.contains_key(&Month::new(2023, 12).unwrap()));
    }

    #[test]
    fn test_skipped_firm_entries_are_reported() {
        let doc = json!({"firms": {"WIT": {"quarterly": [
            {"quarter": "2024-Q1", "headcount": 10}
        ]}}});
        let extraction = RevPerEmployeeExtractor::new(RevPerEmployeeConfig::default()).extract(&doc);
        assert!(extraction.series.is_empty());
        assert_eq!(extraction.skipped.len(), 1);
    }
}
