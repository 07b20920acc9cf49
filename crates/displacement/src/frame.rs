//! Tabular view of a composite index.

use displacement_traits::Result;
use polars::prelude::*;

use crate::output::CompositeIndex;

/// One row per month: `date`, `score`, `phase`, `trend`, then one column of
/// normalized values per weighted signal.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use displacement::{DisplacementEngine, EngineConfig, SignalDocuments, to_frame};
///
/// let engine = DisplacementEngine::new(EngineConfig::default()).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
/// let report = engine.run(&SignalDocuments::new(), as_of).unwrap();
///
/// let frame = to_frame(&report.index).unwrap();
/// assert_eq!(frame.shape(), (38, 11));
/// ```
pub fn to_frame(index: &CompositeIndex) -> Result<DataFrame> {
    let dates: Vec<String> = index.monthly.iter().map(|r| r.date.to_string()).collect();
    let scores: Vec<f64> = index.monthly.iter().map(|r| r.score).collect();
    let phases: Vec<String> = index.monthly.iter().map(|r| r.phase.to_string()).collect();
    let trends: Vec<String> = index.monthly.iter().map(|r| r.trend.to_string()).collect();

    let mut frame = df! {
        "date" => dates,
        "score" => scores,
        "phase" => phases,
        "trend" => trends,
    }?;

    for id in index.weights.keys() {
        let normalized: Vec<f64> = index
            .monthly
            .iter()
            .map(|r| r.components.get(id).map_or(0.0, |p| p.normalized))
            .collect();
        frame.with_column(Series::new(id.as_str().into(), normalized))?;
    }

    Ok(frame)
}

/// Months spent in each phase with the mean score, in order of first appearance.
pub fn phase_summary(frame: &DataFrame) -> Result<DataFrame> {
    let summary = frame
        .clone()
        .lazy()
        .group_by_stable([col("phase")])
        .agg([
            col("score").count().alias("months"),
            col("score").mean().alias("mean_score"),
            col("score").max().alias("max_score"),
        ])
        .collect()?;
    Ok(summary)
}
