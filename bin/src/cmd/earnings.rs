//! Earnings normalization command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use displacement::earnings::{DerivationConfig, EarningsDerivation, normalize_document};
use tracing::{info, warn};

use crate::data;

/// Derive firm metrics from a raw earnings document and write the result.
pub(crate) async fn normalize_earnings(input: &Path, output: &Path, threshold: f64) -> Result<()> {
    if !threshold.is_finite() {
        bail!("relabeling threshold must be finite, got {threshold}");
    }

    let raw = data::read_json(input)
        .await?
        .with_context(|| format!("{} does not exist", input.display()))?;

    let derivation = EarningsDerivation::new(DerivationConfig {
        relabeling_threshold: threshold,
    });
    let (normalized, skipped) = normalize_document(&raw, &derivation);
    for detail in &skipped {
        warn!("skipped {detail}");
    }

    let json = serde_json::to_string_pretty(&normalized)?;
    data::write_json(output, &json).await?;
    info!(path = %output.display(), firms = normalized.firms.len(), "wrote normalized earnings");

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Normalized Earnings                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Firms:     {}", normalized.firms.len());
    println!("Quarters:  {}", normalized.aggregate.len());
    println!("Threshold: {threshold}");
    println!();

    println!(
        "{:<9} {:>12} {:>9} {:>11} {:>12} {:>8}",
        "Quarter", "AI rev $M", "AI %", "Relabeling", "Rev/emp $K", "Flagged"
    );
    println!("{}", "─".repeat(66));
    let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    for record in &normalized.aggregate {
        println!(
            "{:<9} {:>12} {:>9} {:>11} {:>12} {:>8}",
            record.quarter.to_string(),
            cell(record.total_ai_revenue),
            cell(record.avg_ai_pct),
            cell(record.avg_relabeling_index),
            cell(record.avg_rev_per_employee),
            record.firms_flagged_relabeling
        );
    }
    println!();
    println!("Wrote {}", output.display());
    if !skipped.is_empty() {
        println!("Skipped {} unusable entries (see log)", skipped.len());
    }
    println!();

    Ok(())
}
