//! Firm earnings records and their tolerant parser.

use displacement_traits::{Quarter, probe};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw quarterly facts for one firm.
///
/// Revenue figures are in millions of dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmQuarterlyRecord {
    /// Firm ticker.
    pub ticker: String,
    /// Fiscal quarter.
    pub quarter: Quarter,
    /// Total revenue ($M).
    pub total_revenue: f64,
    /// Disclosed AI-attributed revenue ($M), if any.
    pub ai_revenue: Option<f64>,
    /// Reported headcount, if any.
    pub headcount: Option<f64>,
}

/// Provenance fields carried from the collector document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Upstream data source name.
    pub source: Option<String>,
    /// Date the collector last ran.
    pub last_updated: Option<String>,
    /// Whether the document holds generated data.
    pub mock: bool,
}

impl SourceMetadata {
    /// Reads the `metadata` block of any collector document.
    pub fn from_document(document: &Value) -> Self {
        let Some(metadata) = document.get("metadata") else {
            return Self::default();
        };
        Self {
            source: probe::string(metadata, "source").map(str::to_string),
            last_updated: probe::string(metadata, "last_updated").map(str::to_string),
            mock: metadata
                .get("mock")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

/// One firm with its quarterly history in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Firm {
    /// Firm ticker.
    pub ticker: String,
    /// Display name (falls back to the ticker).
    pub name: String,
    /// Quarterly records, sorted and unique by quarter.
    pub quarters: Vec<FirmQuarterlyRecord>,
}

/// Parsed earnings collector document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarningsDocument {
    /// Provenance.
    pub metadata: SourceMetadata,
    /// Firms, ordered by ticker.
    pub firms: Vec<Firm>,
}

impl EarningsDocument {
    /// Whether the document carries a `firms` map that can be derived from.
    pub fn has_firms(document: &Value) -> bool {
        document
            .get("firms")
            .and_then(Value::as_object)
            .is_some_and(|firms| !firms.is_empty())
    }

    /// Parses a raw `{metadata, firms: {TICKER: {name, quarterly: [...]}}}` document.
    ///
    /// Unusable quarterly entries (missing quarter key or total revenue,
    /// duplicate quarter) are dropped and described in the returned list.
    pub fn from_value(document: &Value) -> (Self, Vec<String>) {
        let mut skipped = Vec::new();
        let mut firms = Vec::new();

        let entries = document.get("firms").and_then(Value::as_object);
        for (ticker, firm) in entries.into_iter().flatten() {
            let name = probe::string(firm, "name").unwrap_or(ticker).to_string();
            let mut quarters: Vec<FirmQuarterlyRecord> = Vec::new();

            for (i, entry) in probe::array(firm, "quarterly")
                .unwrap_or_default()
                .iter()
                .enumerate()
            {
                match parse_record(ticker, entry) {
                    Ok(record) => quarters.push(record),
                    Err(reason) => skipped.push(format!("firms.{ticker}.quarterly[{i}]: {reason}")),
                }
            }

            quarters.sort_by_key(|r| r.quarter);
            let before = quarters.len();
            quarters.dedup_by_key(|r| r.quarter);
            if quarters.len() < before {
                skipped.push(format!(
                    "firms.{ticker}: {} duplicate quarter(s) dropped",
                    before - quarters.len()
                ));
            }

            firms.push(Firm {
                ticker: ticker.clone(),
                name,
                quarters,
            });
        }

        let parsed = Self {
            metadata: SourceMetadata::from_document(document),
            firms,
        };
        (parsed, skipped)
    }
}

fn parse_record(ticker: &str, entry: &Value) -> Result<FirmQuarterlyRecord, &'static str> {
    let quarter = probe::string(entry, "quarter")
        .and_then(Quarter::parse_key)
        .ok_or("missing or invalid quarter")?;
    let total_revenue = probe::first_number(entry, &["total_revenue_mm", "total_revenue"])
        .ok_or("missing total revenue")?;

    Ok(FirmQuarterlyRecord {
        ticker: ticker.to_string(),
        quarter,
        total_revenue,
        ai_revenue: probe::first_number(entry, &["ai_revenue_mm", "ai_revenue"]),
        headcount: probe::first_number(entry, &["headcount"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_firms() {
        let doc = json!({
            "metadata": {"source": "SEC EDGAR XBRL", "last_updated": "2026-02-26", "mock": true},
            "firms": {
                "ACN": {
                    "name": "Accenture",
                    "quarterly": [
                        {"quarter": "2023-Q1", "total_revenue_mm": 16000.0, "ai_revenue_mm": 400.0, "headcount": 738000},
                        {"quarter": "2022-Q4", "total_revenue_mm": 15700.0, "ai_revenue_mm": null, "headcount": 740000}
                    ]
                },
                "EPAM": {
                    "quarterly": [
                        {"quarter": "2022-Q4", "total_revenue_mm": 1200.0}
                    ]
                }
            }
        });

        let (parsed, skipped) = EarningsDocument::from_value(&doc);
        assert!(skipped.is_empty());
        assert!(parsed.metadata.mock);
        assert_eq!(parsed.metadata.source.as_deref(), Some("SEC EDGAR XBRL"));
        assert_eq!(parsed.firms.len(), 2);

        let acn = &parsed.firms[0];
        assert_eq!(acn.ticker, "ACN");
        assert_eq!(acn.name, "Accenture");
        assert_eq!(acn.quarters[0].quarter.to_string(), "2022-Q4");
        assert_eq!(acn.quarters[0].ai_revenue, None);
        assert_eq!(acn.quarters[1].ai_revenue, Some(400.0));
        assert_eq!(acn.quarters[1].headcount, Some(738_000.0));

        let epam = &parsed.firms[1];
        assert_eq!(epam.name, "EPAM");
        assert_eq!(epam.quarters[0].headcount, None);
    }

    #[test]
    fn test_parse_skips_malformed_points() {
        let doc = json!({
            "firms": {
                "WIT": {
                    "name": "Wipro",
                    "quarterly": [
                        {"quarter": "2023-Q1", "total_revenue_mm": 2700.0},
                        {"quarter": "bad", "total_revenue_mm": 2700.0},
                        {"quarter": "2023-Q2"},
                        {"quarter": "2023-Q1", "total_revenue_mm": 2800.0}
                    ]
                }
            }
        });

        let (parsed, skipped) = EarningsDocument::from_value(&doc);
        assert_eq!(parsed.firms[0].quarters.len(), 1);
        assert_eq!(skipped.len(), 3);
        assert!(skipped[0].contains("quarterly[1]"));
        assert!(skipped[1].contains("missing total revenue"));
    }

    #[test]
    fn test_missing_firms_is_empty() {
        let (parsed, skipped) = EarningsDocument::from_value(&json!({"aggregate": []}));
        assert!(parsed.firms.is_empty());
        assert!(skipped.is_empty());
        assert!(!EarningsDocument::has_firms(&json!({"aggregate": []})));
        assert!(!EarningsDocument::has_firms(&json!({"firms": {}})));
    }
}
