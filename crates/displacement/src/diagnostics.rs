//! Non-fatal conditions reported next to the composite index.

use derive_more::Display;
use displacement_traits::SignalId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Something the run tolerated but a reader should know about.
///
/// Diagnostics never change the shape of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No document was loaded for the signal.
    #[display("{signal}: source document missing")]
    MissingSource {
        /// Affected signal
        signal: SignalId,
    },

    /// A point in the document was present but unusable and was skipped.
    #[display("{signal}: skipped {detail}")]
    MalformedField {
        /// Affected signal
        signal: SignalId,
        /// Which point and why
        detail: String,
    },

    /// A near-zero denominator was resolved by a fallback rule instead of dividing.
    #[display("{signal}: division hazard at {detail}")]
    DivisionHazard {
        /// Affected signal
        signal: SignalId,
        /// Where it happened and which fallback applied
        detail: String,
    },

    /// Every observed value is the same, so the signal scores 50 throughout.
    #[display("{signal}: degenerate range, every value is {value}")]
    DegenerateRange {
        /// Affected signal
        signal: SignalId,
        /// The single observed value
        value: f64,
    },

    /// A document was loaded but yielded no usable points.
    #[display("{signal}: document yielded no data")]
    EmptySignal {
        /// Affected signal
        signal: SignalId,
    },
}

impl Diagnostic {
    /// The signal this diagnostic is about.
    pub const fn signal(&self) -> SignalId {
        match self {
            Self::MissingSource { signal }
            | Self::MalformedField { signal, .. }
            | Self::DivisionHazard { signal, .. }
            | Self::DegenerateRange { signal, .. }
            | Self::EmptySignal { signal } => *signal,
        }
    }

    /// Logs the diagnostic at warn level.
    pub fn emit(&self) {
        warn!(signal = %self.signal(), "{self}");
    }
}
