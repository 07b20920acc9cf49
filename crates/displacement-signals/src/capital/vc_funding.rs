//! AI-startup venture funding.

use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
use serde_json::Value;

use crate::points::quarterly_section;

/// Quarterly venture funding in millions of dollars.
///
/// Reads `aggregate[].{quarter, total_funding_mm}`. Funding is a flow, so
/// monthly expansion spreads each quarter's total over its three months.
#[derive(Debug, Clone, Copy, Default)]
pub struct VcFundingExtractor;

impl SignalExtractor for VcFundingExtractor {
    fn id(&self) -> SignalId {
        SignalId::VcFunding
    }

    fn quantity(&self) -> Quantity {
        Quantity::Flow
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();
        let series = quarterly_section(document, "aggregate", &["total_funding_mm"], &mut skipped)
            .unwrap_or_default();
        Extraction::with_skipped(RawSeries::Quarterly(series), skipped)
    }
}
