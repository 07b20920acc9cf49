//! Earnings derivation for the displacement index.
//!
//! Turns raw quarterly firm filings into secondary ratios:
//! - AI revenue as a share of total revenue
//! - revenue per employee
//! - the relabeling index, which compares AI-revenue growth with
//!   total-revenue growth to spot firms rebranding existing revenue as "AI"
//!
//! The per-firm results are then aggregated across firms per quarter.
//!
//! # Example
//!
//! ```
//! use displacement_earnings::{EarningsDerivation, normalize_document};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "firms": {
//!         "ACN": {"name": "Accenture", "quarterly": [
//!             {"quarter": "2024-Q1", "total_revenue_mm": 1000.0, "ai_revenue_mm": 100.0},
//!             {"quarter": "2024-Q2", "total_revenue_mm": 1010.0, "ai_revenue_mm": 150.0}
//!         ]}
//!     }
//! });
//!
//! let (normalized, skipped) = normalize_document(&raw, &EarningsDerivation::default());
//! assert!(skipped.is_empty());
//! assert_eq!(normalized.aggregate[1].firms_flagged_relabeling, 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod aggregate;
pub mod derive;
pub mod normalized;
pub mod types;

pub use aggregate::{AggregateRecord, aggregate, rev_per_employee_series};
pub use derive::{
    DEFAULT_RELABELING_THRESHOLD, DerivationConfig, DerivedQuarter, EarningsDerivation,
    division_hazard, growth_rate,
};
pub use normalized::{NormalizedEarnings, NormalizedFirm, NormalizedMetadata, normalize_document};
pub use types::{EarningsDocument, Firm, FirmQuarterlyRecord, SourceMetadata};
