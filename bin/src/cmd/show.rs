//! Show command implementation.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use displacement::{CompositeIndex, phase_summary, to_frame};
use polars::prelude::*;

use crate::data;

/// Print a composite index document as a monthly table.
pub(crate) async fn show_index(input: &Path) -> Result<()> {
    let value = data::read_json(input)
        .await?
        .with_context(|| format!("{} does not exist", input.display()))?;
    let index: CompositeIndex =
        serde_json::from_value(value).with_context(|| format!("{} is not a composite index", input.display()))?;
    let frame = to_frame(&index)?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Displacement Composite                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Source:  {} v{}", index.metadata.source, index.metadata.version);
    println!("As of:   {}", index.metadata.last_updated);
    if index.metadata.mock {
        println!("Data:    MOCK");
    }
    println!();

    print_monthly(&frame)?;

    let summary = phase_summary(&frame)?;
    println!("{summary}");
    println!();

    if !index.events.is_empty() {
        println!("Events:");
        for event in &index.events {
            println!("  {}  {:<28} {}", event.date, event.label, event.kind);
        }
        println!();
    }

    Ok(())
}

fn str_column<'a>(frame: &'a DataFrame, name: &str) -> Result<Vec<&'a str>> {
    Ok(frame
        .column(name)
        .map_err(|e| anyhow!("Missing {name} column: {e}"))?
        .as_materialized_series()
        .str()
        .map_err(|e| anyhow!("{name} column error: {e}"))?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn f64_column(frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(frame
        .column(name)
        .map_err(|e| anyhow!("Missing {name} column: {e}"))?
        .as_materialized_series()
        .f64()
        .map_err(|e| anyhow!("{name} column error: {e}"))?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn print_monthly(frame: &DataFrame) -> Result<()> {
    let dates = str_column(frame, "date")?;
    let scores = f64_column(frame, "score")?;
    let phases = str_column(frame, "phase")?;
    let trends = str_column(frame, "trend")?;

    let signals: Vec<String> = frame
        .get_column_names()
        .iter()
        .skip(4)
        .map(|name| name.to_string())
        .collect();
    let components = signals
        .iter()
        .map(|name| f64_column(frame, name))
        .collect::<Result<Vec<_>>>()?;

    print!("{:<8} {:>6} {:<15} {:<5}", "Month", "Score", "Phase", "Trend");
    for name in &signals {
        print!(" {:>7}", abbreviate(name));
    }
    println!();
    println!("{}", "─".repeat(37 + 8 * signals.len()));

    for (i, date) in dates.iter().enumerate() {
        print!("{:<8} {:>6.1} {:<15} {:<5}", date, scores[i], phases[i], trends[i]);
        for column in &components {
            print!(" {:>7.1}", column[i]);
        }
        println!();
    }
    println!();
    Ok(())
}

/// Shortens a signal id to fit a table column.
fn abbreviate(name: &str) -> String {
    name.split('_')
        .map(|part| part.chars().take(if name.contains('_') { 3 } else { 7 }).collect::<String>())
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(7)
        .collect()
}
