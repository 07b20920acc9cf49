//! Readers for `[{date|quarter, value...}]` point arrays.
//!
//! A section that exists selects the shape even if every point in it is
//! unusable; callers fall through to alternative shapes only on `None`.

use displacement_traits::{Month, MonthlySeries, Quarter, QuarterlySeries, probe};
use serde_json::Value;

/// Keys holding a month label, in probe order.
const MONTH_KEYS: &[&str] = &["date", "month"];

/// Reads the monthly point array at `key`, or `None` if there is no such array.
pub(crate) fn monthly_section(
    document: &Value,
    key: &str,
    value_keys: &[&str],
    skipped: &mut Vec<String>,
) -> Option<MonthlySeries> {
    let points = probe::array(document, key)?;
    Some(monthly_points(points, key, value_keys, skipped))
}

/// Reads the quarterly point array at `key`, or `None` if there is no such array.
pub(crate) fn quarterly_section(
    document: &Value,
    key: &str,
    value_keys: &[&str],
    skipped: &mut Vec<String>,
) -> Option<QuarterlySeries> {
    let points = probe::array(document, key)?;
    let mut series = QuarterlySeries::new();

    for (i, point) in points.iter().enumerate() {
        let Some(quarter) = probe::string(point, "quarter").and_then(Quarter::parse_key) else {
            skipped.push(format!("{key}[{i}]: missing or invalid quarter"));
            continue;
        };
        match probe::first_number(point, value_keys) {
            Some(value) => {
                series.insert(quarter, value);
            }
            None => skipped.push(format!("{key}[{i}] ({quarter}): no numeric {}", value_keys.join("|"))),
        }
    }
    Some(series)
}

/// Reads monthly points; `label` prefixes skip messages.
pub(crate) fn monthly_points(
    points: &[Value],
    label: &str,
    value_keys: &[&str],
    skipped: &mut Vec<String>,
) -> MonthlySeries {
    let mut series = MonthlySeries::new();

    for (i, point) in points.iter().enumerate() {
        let month = MONTH_KEYS
            .iter()
            .find_map(|key| probe::string(point, key))
            .and_then(Month::parse_key);
        let Some(month) = month else {
            skipped.push(format!("{label}[{i}]: missing or invalid date"));
            continue;
        };
        match probe::first_number(point, value_keys) {
            Some(value) => {
                series.insert(month, value);
            }
            None => skipped.push(format!("{label}[{i}] ({month}): no numeric {}", value_keys.join("|"))),
        }
    }
    series
}
