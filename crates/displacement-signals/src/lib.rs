//! Signal extractors for the displacement index.
//!
//! This crate provides one extractor per composite signal, grouped by category:
//! - Labor: employment headcount, AI-to-traditional job posting ratio
//! - Capital: revenue per employee, venture funding
//! - Adoption: search interest, GitHub activity
//! - Regulatory: cumulative guidance documents
//!
//! Each extractor reads its collector's loosely-structured JSON document into
//! a sparse series at the source's native resolution. [`ExtractMonthly`] then
//! brings quarterly signals onto months with [`TemporalExpander`].
//!
//! # Example
//!
//! ```
//! use displacement_signals::{ExtractMonthly, default_extractors};
//! use displacement_traits::SignalId;
//! use serde_json::json;
//!
//! let extractors = default_extractors();
//! assert_eq!(extractors.len(), 7);
//!
//! let funding = json!({"aggregate": [{"quarter": "2024-Q1", "total_funding_mm": 900.0}]});
//! let vc = extractors.iter().find(|e| e.id() == SignalId::VcFunding).unwrap();
//! assert_eq!(vc.monthly(Some(&funding)).series.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod adoption;
pub mod capital;
pub mod expand;
pub mod labor;
mod points;
pub mod registry;
pub mod regulatory;

use displacement_earnings::DerivationConfig;
use displacement_traits::{SignalExtractor, SignalId};

// Re-export key types
pub use expand::{ExpansionPolicy, ExtractMonthly, MonthlyExtraction, TemporalExpander};
pub use registry::{Resolution, SignalCategory, SignalInfo};

/// Builds the extractor for one signal with default configuration.
#[must_use]
pub fn extractor_for(id: SignalId) -> Box<dyn SignalExtractor> {
    match id {
        SignalId::Employment => Box::new(labor::EmploymentExtractor::default()),
        SignalId::RevPerEmployee => Box::new(capital::RevPerEmployeeExtractor::default()),
        SignalId::VcFunding => Box::new(capital::VcFundingExtractor),
        SignalId::JobRatio => Box::new(labor::JobRatioExtractor),
        SignalId::Trends => Box::new(adoption::TrendsExtractor::default()),
        SignalId::Github => Box::new(adoption::GithubExtractor),
        SignalId::Regulatory => Box::new(regulatory::RegulatoryExtractor),
    }
}

/// Builds all seven extractors in canonical order, deriving earnings with
/// the given configuration.
#[must_use]
pub fn extractors_with(derivation: DerivationConfig) -> Vec<Box<dyn SignalExtractor>> {
    SignalId::ALL
        .into_iter()
        .map(|id| match id {
            SignalId::RevPerEmployee => Box::new(capital::RevPerEmployeeExtractor::new(
                capital::RevPerEmployeeConfig { derivation },
            )) as Box<dyn SignalExtractor>,
            other => extractor_for(other),
        })
        .collect()
}

/// Builds all seven extractors with default configuration.
#[must_use]
pub fn default_extractors() -> Vec<Box<dyn SignalExtractor>> {
    extractors_with(DerivationConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use displacement_traits::Quantity;

    #[test]
    fn test_extractor_ids_match() {
        for id in SignalId::ALL {
            assert_eq!(extractor_for(id).id(), id);
        }
    }

    #[test]
    fn test_default_extractors_order() {
        let ids: Vec<SignalId> = default_extractors().iter().map(|e| e.id()).collect();
        assert_eq!(ids, SignalId::ALL.to_vec());
    }

    #[test]
    fn test_quantities_match_registry() {
        for extractor in default_extractors() {
            let info = registry::get_signal_info(extractor.id()).unwrap();
            assert_eq!(extractor.quantity(), info.quantity, "{}", info.id);
        }
        assert_eq!(extractor_for(SignalId::VcFunding).quantity(), Quantity::Flow);
    }
}
