#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/displacement-curve/displacement/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # displacement
//!
//! Composite index of AI-driven displacement in professional services.
//!
//! displacement is an umbrella crate that re-exports the displacement sub-crates
//! and adds the pieces that tie them together: configuration, the
//! [`DisplacementEngine`] entry point, diagnostics, the output document and a
//! tabular view.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use displacement::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let documents = SignalDocuments::new()
//!     .with(SignalId::VcFunding, json!({"aggregate": [
//!         {"quarter": "2024-Q1", "total_funding_mm": 300.0},
//!         {"quarter": "2024-Q2", "total_funding_mm": 900.0}
//!     ]}));
//!
//! let engine = DisplacementEngine::new(EngineConfig::default())?;
//! let report = engine.run(&documents, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())?;
//!
//! let april = report.index.monthly.iter().find(|r| r.date.to_string() == "2024-04").unwrap();
//! assert_eq!(april.components[&SignalId::VcFunding].raw_value, 300.0);
//! assert_eq!(april.components[&SignalId::VcFunding].normalized, 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Periods, signal ids, the [`SignalExtractor`] trait, errors
//! - [`earnings`] - Firm-level earnings derivation and aggregation
//! - [`signals`] - The seven extractors, temporal expansion, signal registry
//! - [`combine`] - Normalization, weighting, phases and trends
//!
//! ## Pipeline
//!
//! 1. **Documents** hold one optional raw JSON document per signal
//! 2. **Extractors** turn each document into a sparse series
//! 3. **Expansion** spreads quarterly series onto months
//! 4. **Normalization** scales every signal onto 0-100
//! 5. **Scoring** weights and sums the signals, then labels phase and trend

/// Version information for the displacement crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod diagnostics;
mod documents;
mod engine;
mod frame;
mod output;

pub use config::{
    DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, EngineConfig, Event, EventKind, MonthWindow,
    OutputConfig, RangePreset, default_events, theoretical_range,
};
pub use diagnostics::Diagnostic;
pub use documents::SignalDocuments;
pub use engine::{DisplacementEngine, EngineReport, ExtractedSignals, SignalSummary};
pub use frame::{phase_summary, to_frame};
pub use output::{CompositeIndex, OutputMetadata};

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
///
/// - [`Month`] and [`Quarter`] - Chronologically ordered period keys
/// - [`SignalId`], [`Direction`], [`Quantity`] - Signal metadata
/// - [`SignalExtractor`] - Raw document to sparse series
pub mod traits {
    pub use displacement_traits::*;
}

pub use displacement_traits::{
    Direction, DisplacementError, Month, MonthlySeries, Quantity, Quarter, QuarterlySeries,
    Result, SignalExtractor, SignalId,
};

// ============================================================================
// Earnings
// ============================================================================

/// Firm-level earnings derivation.
///
/// Per firm and quarter: AI revenue share, revenue per employee and the
/// relabeling index, plus the cross-firm aggregate per quarter.
///
/// # Example
///
/// ```
/// use displacement::earnings::growth_rate;
///
/// assert_eq!(growth_rate(150.0, 100.0), 0.5);
/// ```
pub mod earnings {
    pub use displacement_earnings::*;
}

// ============================================================================
// Signals
// ============================================================================

/// Signal extractors and the signal registry.
pub mod signals {
    pub use displacement_signals::*;
}

pub use displacement_signals::{ExtractMonthly, SignalCategory, SignalInfo};

// ============================================================================
// Combination
// ============================================================================

/// Normalization and weighted combination.
///
/// ## Phases
///
/// ```text
/// score <= 25   Pre-disruption
/// score <= 50   Productivity
/// score <= 75   Erosion
/// otherwise     Displacement
/// ```
pub mod combine {
    pub use displacement_combine::*;
}

pub use displacement_combine::{CompositeRecord, NormalizedPoint, Phase, RangePolicy, Trend};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use displacement::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CompositeIndex, CompositeRecord, Diagnostic, DisplacementEngine, EngineConfig,
        EngineReport, Phase, RangePreset, SignalDocuments, Trend,
    };
    pub use crate::{Direction, DisplacementError, Month, Quarter, Result, SignalId};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_extractor(_extractor: &dyn SignalExtractor) {}
        fn _accept_combiner(_combiner: &dyn combine::Combiner) {}

        assert_eq!(signals::registry::available_signals().len(), 7);
        assert_eq!(traits::SignalId::ALL.len(), 7);
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = DisplacementError::Configuration("weights".to_string());
        assert!(error.to_string().contains("weights"));
    }
}
