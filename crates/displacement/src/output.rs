//! The composite index document.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use displacement_combine::CompositeRecord;
use displacement_traits::{Result, SignalId};
use serde::{Deserialize, Serialize};

use crate::config::Event;

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Name of the index
    pub source: String,
    /// Date the run was stamped with
    pub last_updated: NaiveDate,
    /// True when any input declared itself mock data
    pub mock: bool,
    /// Document format version
    pub version: String,
}

/// The full output of a run: metadata, weights, monthly records and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndex {
    /// Document metadata
    pub metadata: OutputMetadata,
    /// Weight of each signal
    pub weights: BTreeMap<SignalId, f64>,
    /// One record per month of the window
    pub monthly: Vec<CompositeRecord>,
    /// Milestones passed through from configuration
    pub events: Vec<Event>,
}

impl CompositeIndex {
    /// Serializes with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a previously written document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&CompositeRecord> {
        self.monthly.last()
    }

    /// The first record.
    pub fn earliest(&self) -> Option<&CompositeRecord> {
        self.monthly.first()
    }

    /// The record with the highest score; the earliest wins ties.
    pub fn peak(&self) -> Option<&CompositeRecord> {
        self.monthly
            .iter()
            .reduce(|best, r| if r.score > best.score { r } else { best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use displacement_combine::{NormalizedPoint, Phase, Trend};
    use displacement_traits::Month;

    fn record(month: u32, score: f64) -> CompositeRecord {
        let phase = Phase::from_score(score);
        CompositeRecord {
            date: Month::new(2024, month).unwrap(),
            score,
            phase,
            phase_range: phase.range().to_string(),
            components: BTreeMap::from([(
                SignalId::Github,
                NormalizedPoint {
                    raw_value: 12.0,
                    normalized: score,
                    weighted: score,
                },
            )]),
            trend: Trend::Flat,
        }
    }

    fn index() -> CompositeIndex {
        CompositeIndex {
            metadata: OutputMetadata {
                source: "Displacement Curve Composite".to_string(),
                last_updated: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                mock: false,
                version: "1.0".to_string(),
            },
            weights: BTreeMap::from([(SignalId::Github, 1.0)]),
            monthly: vec![record(1, 20.0), record(2, 48.5), record(3, 48.5), record(4, 30.0)],
            events: Vec::new(),
        }
    }

    #[test]
    fn test_field_names() {
        let value = serde_json::to_value(index()).unwrap();
        assert_eq!(value["metadata"]["last_updated"], "2025-12-31");
        assert_eq!(value["weights"]["github"], 1.0);

        let first = &value["monthly"][0];
        assert_eq!(first["date"], "2024-01");
        assert_eq!(first["phase"], "Pre-disruption");
        assert_eq!(first["phase_range"], "0-25");
        assert_eq!(first["trend"], "flat");
        assert_eq!(first["components"]["github"]["raw_value"], 12.0);
    }

    #[test]
    fn test_json_round_trip() {
        let written = index();
        let json = written.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"metadata\""));
        assert_eq!(CompositeIndex::from_json(&json).unwrap(), written);
    }

    #[test]
    fn test_summary_accessors() {
        let idx = index();
        assert_eq!(idx.earliest().unwrap().score, 20.0);
        assert_eq!(idx.latest().unwrap().score, 30.0);
        assert_eq!(idx.peak().unwrap().date.to_string(), "2024-02");
    }
}
