//! Quarterly-to-monthly expansion.
//!
//! A quarterly level (a ratio, a cumulative count) holds for each of its
//! months; a quarterly flow (money raised) is split evenly across them.

use displacement_traits::{
    Extraction, MonthlySeries, Quantity, QuarterlySeries, RawSeries, SignalExtractor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// How one quarterly value maps onto its three months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionPolicy {
    /// Every month gets the quarterly value.
    Replicate,
    /// Every month gets a third of the quarterly value.
    Distribute,
}

impl From<Quantity> for ExpansionPolicy {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Level => Self::Replicate,
            Quantity::Flow => Self::Distribute,
        }
    }
}

/// Expands quarterly series to monthly ones under a fixed policy.
///
/// # Example
///
/// ```
/// use displacement_signals::{ExpansionPolicy, TemporalExpander};
/// use displacement_traits::{Quarter, QuarterlySeries};
///
/// let mut funding = QuarterlySeries::new();
/// funding.insert(Quarter::new(2024, 1).unwrap(), 90.0);
///
/// let monthly = TemporalExpander::new(ExpansionPolicy::Distribute).expand(&funding);
/// assert_eq!(monthly.len(), 3);
/// assert!(monthly.values().all(|v| *v == 30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalExpander {
    policy: ExpansionPolicy,
}

impl TemporalExpander {
    /// Create an expander with an explicit policy.
    #[must_use]
    pub const fn new(policy: ExpansionPolicy) -> Self {
        Self { policy }
    }

    /// Create the expander matching a signal's quantity.
    #[must_use]
    pub fn for_quantity(quantity: Quantity) -> Self {
        Self::new(quantity.into())
    }

    /// Get the expansion policy.
    #[must_use]
    pub const fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    /// Expands every quarter into its three months.
    pub fn expand(&self, series: &QuarterlySeries) -> MonthlySeries {
        let mut monthly = MonthlySeries::new();
        for (quarter, value) in series {
            let per_month = match self.policy {
                ExpansionPolicy::Replicate => *value,
                ExpansionPolicy::Distribute => value / 3.0,
            };
            for month in quarter.months() {
                monthly.insert(month, per_month);
            }
        }
        monthly
    }
}

/// A monthly series plus the points dropped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyExtraction {
    /// Values keyed by month.
    pub series: MonthlySeries,
    /// One entry per unusable point in the source document.
    pub skipped: Vec<String>,
    /// One entry per near-zero denominator resolved by a fallback rule.
    pub hazards: Vec<String>,
}

/// Extraction at monthly resolution for any [`SignalExtractor`].
///
/// Quarterly output is expanded with the policy derived from the extractor's
/// [`Quantity`]. An absent document yields an empty extraction.
pub trait ExtractMonthly {
    /// Extracts and expands the document to months.
    fn monthly(&self, document: Option<&Value>) -> MonthlyExtraction;
}

impl<T: SignalExtractor + ?Sized> ExtractMonthly for T {
    fn monthly(&self, document: Option<&Value>) -> MonthlyExtraction {
        let Some(document) = document else {
            return MonthlyExtraction::default();
        };

        let Extraction {
            series,
            skipped,
            hazards,
        } = self.extract(document);
        let series = match series {
            RawSeries::Monthly(series) => series,
            RawSeries::Quarterly(series) => {
                let expander = TemporalExpander::for_quantity(self.quantity());
                debug!(
                    signal = %self.id(),
                    quarters = series.len(),
                    policy = ?expander.policy(),
                    "expanding quarterly series"
                );
                expander.expand(&series)
            }
        };

        debug!(
            signal = %self.id(),
            months = series.len(),
            skipped = skipped.len(),
            "extracted signal"
        );
        MonthlyExtraction {
            series,
            skipped,
            hazards,
        }
    }
}
