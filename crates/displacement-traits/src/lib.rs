#![doc(issue_tracker_base_url = "https://github.com/displacement-curve/displacement/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the displacement composite index.
//!
//! This crate provides the foundational abstractions shared by every stage of
//! the pipeline: calendar periods, sparse series, signal identifiers, the
//! [`SignalExtractor`] trait, and the workspace error type.

/// The version of the displacement-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod probe;
pub mod signal;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{DisplacementError, Result};
pub use signal::{Direction, Extraction, Quantity, RawSeries, SignalExtractor, SignalId};
pub use types::{Month, MonthlySeries, Quarter, QuarterlySeries};
