//! Cumulative AI-related regulatory guidance.

use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
use serde_json::Value;

use crate::points::quarterly_section;

/// Quarterly cumulative count of regulatory documents.
///
/// Reads `aggregate[].{quarter, cumulative_documents}`. The count is a level
/// and is replicated across the quarter's months.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegulatoryExtractor;

impl SignalExtractor for RegulatoryExtractor {
    fn id(&self) -> SignalId {
        SignalId::Regulatory
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();
        let series =
            quarterly_section(document, "aggregate", &["cumulative_documents"], &mut skipped)
                .unwrap_or_default();
        Extraction::with_skipped(RawSeries::Quarterly(series), skipped)
    }
}
