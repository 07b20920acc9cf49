//! Professional-services headcount.

use displacement_traits::{Extraction, Quantity, RawSeries, SignalExtractor, SignalId, probe};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::points::{monthly_points, monthly_section};

/// Per-point value keys in the `monthly[]` shape.
const MONTHLY_KEYS: &[&str] = &["total_employment", "employment"];

/// Configuration for the employment extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentConfig {
    /// BLS series read from the raw API shape (default: `CES5000000001`,
    /// professional and business services, thousands of employees)
    pub series_id: String,
}

impl Default for EmploymentConfig {
    fn default() -> Self {
        Self {
            series_id: "CES5000000001".to_string(),
        }
    }
}

/// Monthly headcount extractor.
///
/// Accepts, in order of preference:
/// 1. `monthly[].{date, total_employment | employment}`
/// 2. `series.<series_id>.data[].{date, value}` (raw BLS API output)
/// 3. `aggregate[].{date, total_employment}`
///
/// Headcount is the only signal where a lower value means more displacement.
#[derive(Debug, Clone, Default)]
pub struct EmploymentExtractor {
    config: EmploymentConfig,
}

impl EmploymentExtractor {
    /// Create a new employment extractor with the given configuration.
    #[must_use]
    pub const fn new(config: EmploymentConfig) -> Self {
        Self { config }
    }

    /// Get the BLS series id.
    #[must_use]
    pub fn series_id(&self) -> &str {
        &self.config.series_id
    }
}

impl SignalExtractor for EmploymentExtractor {
    fn id(&self) -> SignalId {
        SignalId::Employment
    }

    fn quantity(&self) -> Quantity {
        Quantity::Level
    }

    fn extract(&self, document: &Value) -> Extraction {
        let mut skipped = Vec::new();

        let series = monthly_section(document, "monthly", MONTHLY_KEYS, &mut skipped)
            .or_else(|| {
                let data = probe::lookup(document, &["series", self.series_id(), "data"])?
                    .as_array()?;
                let label = format!("series.{}.data", self.series_id());
                Some(monthly_points(data, &label, &["value"], &mut skipped))
            })
            .or_else(|| {
                monthly_section(document, "aggregate", &["total_employment"], &mut skipped)
            })
            .unwrap_or_default();

        Extraction::with_skipped(RawSeries::Monthly(series), skipped)
    }
}
