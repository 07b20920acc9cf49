//! Compute command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use displacement::{
    DisplacementEngine, EngineConfig, EngineReport, Month, MonthWindow, RangePreset, SignalId,
};
use tracing::info;

use crate::data;

/// Flags of the `compute` subcommand.
#[derive(Debug)]
pub(crate) struct ComputeArgs {
    pub(crate) data_dir: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) ranges: Option<RangePreset>,
    pub(crate) start: Option<Month>,
    pub(crate) end: Option<Month>,
    pub(crate) as_of: Option<NaiveDate>,
}

/// Builds the engine configuration from file and flag overrides.
pub(crate) fn resolve_config(args: &ComputeArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(preset) = args.ranges {
        config = config.with_ranges(preset);
    }
    if args.start.is_some() || args.end.is_some() {
        config.window = MonthWindow::new(
            args.start.unwrap_or(config.window.start),
            args.end.unwrap_or(config.window.end),
        )?;
    }
    Ok(config)
}

/// Load documents, run the engine and write the composite index.
pub(crate) async fn compute(args: ComputeArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.data_dir.join(data::COMPOSITE_PATH));
    let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let documents = data::load_documents(&args.data_dir)
        .await
        .with_context(|| format!("loading documents from {}", args.data_dir.display()))?;
    info!(
        data_dir = %args.data_dir.display(),
        loaded = documents.len(),
        of = SignalId::ALL.len(),
        "loaded signal documents"
    );

    let engine = DisplacementEngine::new(config)?;
    let report = engine.run(&documents, as_of)?;

    let json = report.index.to_json_pretty()?;
    data::write_json(&output, &json).await?;

    print_report(&report, documents.len());
    println!("Wrote {}\n", output.display());
    Ok(())
}

fn print_report(report: &EngineReport, loaded: usize) {
    let index = &report.index;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Displacement Composite                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Documents: {loaded}/{}", SignalId::ALL.len());
    println!("Months:    {}", index.monthly.len());
    println!("As of:     {}", index.metadata.last_updated);
    if index.metadata.mock {
        println!("Data:      MOCK");
    }
    println!();

    println!("{:<18} {:>7} {:>8} {:>12} {:>12}", "Signal", "Weight", "Months", "Min", "Max");
    println!("{}", "─".repeat(61));
    for summary in &report.summaries {
        let weight = index.weights.get(&summary.id).copied().unwrap_or_default();
        let (min, max) = summary.bounds.map_or_else(
            || ("-".to_string(), "-".to_string()),
            |b| (format!("{:.2}", b.min), format!("{:.2}", b.max)),
        );
        println!(
            "{:<18} {:>7.2} {:>8} {:>12} {:>12}",
            summary.id.as_str(),
            weight,
            summary.months_in_window,
            min,
            max
        );
    }
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("TRAJECTORY");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let rows = [
        ("Start", index.earliest()),
        ("Peak", index.peak()),
        ("Latest", index.latest()),
    ];
    for (label, record) in rows {
        if let Some(r) = record {
            println!(
                "  {label:<8} {}  {:>5.1}  {} ({})  {}",
                r.date, r.score, r.phase, r.phase_range, r.trend
            );
        }
    }
    println!();

    if !report.diagnostics.is_empty() {
        println!("Diagnostics ({}):", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            println!("  {diagnostic}");
        }
        println!();
    }
}
