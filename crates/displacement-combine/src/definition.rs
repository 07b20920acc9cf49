//! Per-signal scoring definitions and their validation.

use std::collections::BTreeSet;

use displacement_traits::{Direction, DisplacementError, Result, SignalId};
use serde::{Deserialize, Serialize};

use crate::normalize::{Bounds, RangePolicy};

/// Allowed distance of the weight total from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// How one signal is normalized and weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalDefinition {
    /// Signal identifier
    pub id: SignalId,
    /// Weight in the composite, in `[0, 1]`
    pub weight: f64,
    /// Which end of the range means displacement
    pub direction: Direction,
    /// Where the normalization bounds come from
    #[serde(default)]
    pub range: RangePolicy,
}

/// Checks a definition set before any computation.
///
/// Every signal must be defined exactly once with a weight in `[0, 1]`, the
/// weights must sum to 1.0, and theoretical ranges must be finite with
/// `min <= max`.
pub fn validate_definitions(definitions: &[SignalDefinition]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for definition in definitions {
        if !seen.insert(definition.id) {
            return Err(DisplacementError::Configuration(format!(
                "signal '{}' is defined more than once",
                definition.id
            )));
        }
        if !(0.0..=1.0).contains(&definition.weight) {
            return Err(DisplacementError::Configuration(format!(
                "weight {} for '{}' is outside [0, 1]",
                definition.weight, definition.id
            )));
        }
        if let RangePolicy::Theoretical { min, max } = definition.range {
            Bounds::new(min, max).map_err(|e| {
                DisplacementError::Configuration(format!("range for '{}': {e}", definition.id))
            })?;
        }
    }

    let missing: Vec<&str> = SignalId::ALL
        .iter()
        .filter(|id| !seen.contains(*id))
        .map(SignalId::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(DisplacementError::Configuration(format!(
            "missing signal definitions: {}",
            missing.join(", ")
        )));
    }

    let total: f64 = definitions.iter().map(|d| d.weight).sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(DisplacementError::Configuration(format!(
            "weights sum to {total}, expected 1.0"
        )));
    }

    Ok(())
}
