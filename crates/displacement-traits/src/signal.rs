//! Signal identifiers and the extractor trait.
//!
//! A signal is one independently-sourced series contributing to the composite
//! index. Each signal has exactly one [`SignalExtractor`] that turns its raw
//! collector document into a sparse series. Extractors are tolerant by
//! contract: they never fail on malformed shape, they report what they skipped.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DisplacementError, MonthlySeries, QuarterlySeries};

/// Identifier of one of the seven composite signals.
///
/// The declaration order is the canonical ordering used for output maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalId {
    /// Professional-services headcount (BLS).
    #[display("employment")]
    Employment,
    /// Average revenue per employee derived from firm earnings.
    #[display("rev_per_employee")]
    RevPerEmployee,
    /// AI-startup venture funding.
    #[display("vc_funding")]
    VcFunding,
    /// Ratio of AI to traditional job postings.
    #[display("job_ratio")]
    JobRatio,
    /// Search interest in displacement-related terms.
    #[display("trends")]
    Trends,
    /// Open-source AI activity.
    #[display("github")]
    Github,
    /// Cumulative AI-related regulatory documents.
    #[display("regulatory")]
    Regulatory,
}

impl SignalId {
    /// All signals in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Employment,
        Self::RevPerEmployee,
        Self::VcFunding,
        Self::JobRatio,
        Self::Trends,
        Self::Github,
        Self::Regulatory,
    ];

    /// Returns the wire name of the signal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::RevPerEmployee => "rev_per_employee",
            Self::VcFunding => "vc_funding",
            Self::JobRatio => "job_ratio",
            Self::Trends => "trends",
            Self::Github => "github",
            Self::Regulatory => "regulatory",
        }
    }
}

impl FromStr for SignalId {
    type Err = DisplacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DisplacementError::InvalidData(format!("unknown signal '{s}'")))
    }
}

/// Which side of a signal's range indicates displacement pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger raw values mean more displacement.
    #[default]
    #[display("higher_is_worse")]
    HigherIsWorse,
    /// Smaller raw values mean more displacement (e.g. headcount).
    #[display("lower_is_worse")]
    LowerIsWorse,
}

/// Whether a coarse-grained value is a flow or a level.
///
/// Decides how a quarterly value is spread onto months: flows are divided,
/// levels are replicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Point-in-time measure (ratio, cumulative count).
    #[default]
    #[display("level")]
    Level,
    /// Amount accumulated over the period (funding raised).
    #[display("flow")]
    Flow,
}

/// Series produced by an extractor at the source's native resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSeries {
    /// Values keyed by month.
    Monthly(MonthlySeries),
    /// Values keyed by quarter.
    Quarterly(QuarterlySeries),
}

impl RawSeries {
    /// Number of periods with a value.
    pub fn len(&self) -> usize {
        match self {
            Self::Monthly(series) => series.len(),
            Self::Quarterly(series) => series.len(),
        }
    }

    /// Whether the series holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the monthly series, if this is one.
    pub const fn as_monthly(&self) -> Option<&MonthlySeries> {
        match self {
            Self::Monthly(series) => Some(series),
            Self::Quarterly(_) => None,
        }
    }

    /// Returns the quarterly series, if this is one.
    pub const fn as_quarterly(&self) -> Option<&QuarterlySeries> {
        match self {
            Self::Quarterly(series) => Some(series),
            Self::Monthly(_) => None,
        }
    }
}

impl Default for RawSeries {
    fn default() -> Self {
        Self::Monthly(MonthlySeries::new())
    }
}

/// Output of a single extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// The extracted series.
    pub series: RawSeries,
    /// One entry per point that was present but unusable.
    pub skipped: Vec<String>,
    /// One entry per near-zero denominator resolved by a fallback rule.
    pub hazards: Vec<String>,
}

impl Extraction {
    /// Creates an extraction with no skipped points.
    pub const fn new(series: RawSeries) -> Self {
        Self::with_skipped(series, Vec::new())
    }

    /// Creates an extraction that dropped the given points.
    pub const fn with_skipped(series: RawSeries, skipped: Vec<String>) -> Self {
        Self {
            series,
            skipped,
            hazards: Vec::new(),
        }
    }

    /// Creates an empty monthly extraction.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Maps a raw collector document onto a sparse series.
///
/// Implementations must be pure and must not panic on unexpected shapes:
/// absent keys yield an empty series, unusable points are recorded in
/// [`Extraction::skipped`] and dropped.
///
/// # Example
///
/// ```
/// use displacement_traits::{
///     Extraction, Month, MonthlySeries, Quantity, RawSeries, SignalExtractor, SignalId,
/// };
/// use serde_json::{json, Value};
///
/// struct FlatMonthly;
///
/// impl SignalExtractor for FlatMonthly {
///     fn id(&self) -> SignalId {
///         SignalId::Trends
///     }
///
///     fn quantity(&self) -> Quantity {
///         Quantity::Level
///     }
///
///     fn extract(&self, document: &Value) -> Extraction {
///         let mut series = MonthlySeries::new();
///         for point in document["monthly"].as_array().into_iter().flatten() {
///             if let (Some(month), Some(value)) = (
///                 point["date"].as_str().and_then(Month::parse_key),
///                 point["value"].as_f64(),
///             ) {
///                 series.insert(month, value);
///             }
///         }
///         Extraction::new(RawSeries::Monthly(series))
///     }
/// }
///
/// let doc = json!({"monthly": [{"date": "2024-01", "value": 3.0}]});
/// assert_eq!(FlatMonthly.extract(&doc).series.len(), 1);
/// ```
pub trait SignalExtractor: Send + Sync {
    /// The signal this extractor feeds.
    fn id(&self) -> SignalId;

    /// How quarterly output is spread onto months.
    ///
    /// Required so that every signal states whether it is a flow or a level.
    fn quantity(&self) -> Quantity;

    /// Extracts the series from a raw document.
    fn extract(&self, document: &Value) -> Extraction;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quarter;
    use serde_json::json;

    struct FixedQuarterly;

    impl SignalExtractor for FixedQuarterly {
        fn id(&self) -> SignalId {
            SignalId::VcFunding
        }

        fn quantity(&self) -> Quantity {
            Quantity::Flow
        }

        fn extract(&self, _document: &Value) -> Extraction {
            let mut series = QuarterlySeries::new();
            series.insert(Quarter::new(2024, 1).unwrap(), 90.0);
            Extraction::new(RawSeries::Quarterly(series))
        }
    }

    #[test]
    fn test_signal_id_roundtrip_names() {
        for id in SignalId::ALL {
            assert_eq!(id.as_str().parse::<SignalId>().unwrap(), id);
            assert_eq!(id.to_string(), id.as_str());
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert!("nonexistent".parse::<SignalId>().is_err());
    }

    #[test]
    fn test_signal_id_order() {
        let mut ids = SignalId::ALL.to_vec();
        ids.reverse();
        ids.sort();
        assert_eq!(ids, SignalId::ALL.to_vec());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Direction::default(), Direction::HigherIsWorse);
        assert_eq!(Quantity::default(), Quantity::Level);
        assert!(Extraction::empty().series.is_empty());
    }

    #[test]
    fn test_extractor_trait() {
        let extractor = FixedQuarterly;
        assert_eq!(extractor.id(), SignalId::VcFunding);
        assert_eq!(extractor.quantity(), Quantity::Flow);

        let extraction = extractor.extract(&json!({}));
        assert_eq!(extraction.series.len(), 1);
        assert!(extraction.series.as_quarterly().is_some());
        assert!(extraction.series.as_monthly().is_none());
        assert!(extraction.skipped.is_empty());
        assert!(extraction.hazards.is_empty());
    }

    #[test]
    fn test_extractor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SignalExtractor>();
    }
}
