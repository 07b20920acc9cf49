//! The normalized earnings document written back next to the raw one.

use std::collections::BTreeMap;

use displacement_traits::QuarterlySeries;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::aggregate::{AggregateRecord, aggregate, rev_per_employee_series};
use crate::derive::{DerivedQuarter, EarningsDerivation};
use crate::types::EarningsDocument;

/// Metadata block of a normalized earnings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    /// Upstream data source carried from the raw document.
    pub source: Option<String>,
    /// Collector run date carried from the raw document.
    pub last_updated: Option<String>,
    /// Whether the raw document held generated data.
    pub mock: bool,
    /// Always `true`; marks the document as derived.
    pub normalized: bool,
    /// Threshold used for `relabeling_flag`.
    pub relabeling_threshold: f64,
}

/// One firm's derived history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFirm {
    /// Display name.
    pub name: String,
    /// Quarterly records with derived fields, chronological.
    pub quarterly: Vec<DerivedQuarter>,
}

/// Derived earnings for every firm plus the cross-firm aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEarnings {
    /// Provenance and derivation parameters.
    pub metadata: NormalizedMetadata,
    /// Firms keyed by ticker.
    pub firms: BTreeMap<String, NormalizedFirm>,
    /// Per-quarter aggregate.
    pub aggregate: Vec<AggregateRecord>,
}

impl NormalizedEarnings {
    /// Runs the derivation over every firm of a parsed document.
    pub fn build(document: &EarningsDocument, derivation: &EarningsDerivation) -> Self {
        let mut firms = BTreeMap::new();
        let mut histories = Vec::with_capacity(document.firms.len());

        for firm in &document.firms {
            let quarterly = derivation.derive_firm(&firm.quarters);
            debug!(
                ticker = %firm.ticker,
                quarters = quarterly.len(),
                flagged = quarterly.iter().filter(|q| q.relabeling_flag).count(),
                "derived firm metrics"
            );
            histories.push(quarterly.clone());
            firms.insert(
                firm.ticker.clone(),
                NormalizedFirm {
                    name: firm.name.clone(),
                    quarterly,
                },
            );
        }

        Self {
            metadata: NormalizedMetadata {
                source: document.metadata.source.clone(),
                last_updated: document.metadata.last_updated.clone(),
                mock: document.metadata.mock,
                normalized: true,
                relabeling_threshold: derivation.relabeling_threshold(),
            },
            firms,
            aggregate: aggregate(&histories),
        }
    }

    /// Every fallback taken by a relabeling index, as `firms.<ticker>.<quarter>: <what>`.
    pub fn hazards(&self) -> Vec<String> {
        self.firms
            .iter()
            .flat_map(|(ticker, firm)| {
                firm.quarterly.iter().filter_map(move |q| {
                    q.division_hazard
                        .map(|hazard| format!("firms.{ticker}.{}: {hazard}", q.quarter))
                })
            })
            .collect()
    }

    /// Quarterly average revenue per employee across firms.
    pub fn rev_per_employee(&self) -> QuarterlySeries {
        rev_per_employee_series(&self.aggregate)
    }
}

/// Parses a raw earnings document and derives it in one step.
///
/// Returns the normalized document and the list of skipped entries.
pub fn normalize_document(
    document: &Value,
    derivation: &EarningsDerivation,
) -> (NormalizedEarnings, Vec<String>) {
    let (parsed, skipped) = EarningsDocument::from_value(document);
    (NormalizedEarnings::build(&parsed, derivation), skipped)
}
