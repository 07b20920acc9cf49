//! AI-to-traditional job posting ratio.

use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
use serde_json::Value;

use crate::points::monthly_section;

/// Per-point value keys, in probe order.
///
/// The postings collector writes `ai_to_traditional_ratio`; the shorter
/// names appear in hand-assembled files.
const RATIO_KEYS: &[&str] = &["ai_to_traditional_ratio", "job_ratio", "ratio"];

/// Monthly ratio of AI-skill postings to traditional-skill postings.
///
/// Reads `monthly[].{date, ai_to_traditional_ratio}`. Points with a null
/// ratio are skipped rather than read as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobRatioExtractor;

impl SignalExtractor for JobRatioExtractor {
    fn id(&self) -> SignalId {
        SignalId::JobRatio
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();
        let series = monthly_section(document, "monthly", RATIO_KEYS, &mut skipped).unwrap_or_default();
        Extraction::with_skipped(RawSeries::Monthly(series), skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use displacement_traits::Month;
    use serde_json::json;

    #[test]
    fn test_extract_ratio() {
        let doc = json!({
            "metadata": {"mock": true},
            "monthly": [
                {"date": "2023-01", "ai_postings": 120, "traditional_postings": 1000, "ai_to_traditional_ratio": 0.12},
                {"date": "2023-02", "ai_to_traditional_ratio": null},
                {"date": "2023-03", "ratio": 0.15}
            ]
        });
        let extraction = JobRatioExtractor.extract(&doc);
        let series = extraction.series.as_monthly().unwrap();

        assert_eq!(series.len(), 2);
        assert_relative_eq!(series[&Month::new(2023, 1).unwrap()], 0.12);
        assert_relative_eq!(series[&Month::new(2023, 3).unwrap()], 0.15);
        assert_eq!(extraction.skipped.len(), 1);
        assert!(extraction.skipped[0].contains("2023-02"));
    }

    #[test]
    fn test_ignores_aggregate() {
        let doc = json!({"aggregate": [{"date": "2023-01", "ai_to_traditional_ratio": 0.1}]});
        assert!(JobRatioExtractor.extract(&doc).series.is_empty());
    }
}
