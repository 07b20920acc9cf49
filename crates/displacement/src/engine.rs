//! End-to-end pipeline: documents in, composite index out.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use displacement_combine::{Bounds, CompositeScorer};
use displacement_signals::{ExtractMonthly, extractors_with};
use displacement_traits::{MonthlySeries, Result, SignalExtractor, SignalId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::diagnostics::Diagnostic;
use crate::documents::SignalDocuments;
use crate::output::{CompositeIndex, OutputMetadata};

/// Per-signal coverage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Signal
    pub id: SignalId,
    /// Months with data, anywhere in the extracted series
    pub months: usize,
    /// Months with data inside the output window
    pub months_in_window: usize,
    /// Bounds the signal was normalized against, if any
    pub bounds: Option<Bounds>,
}

/// Output of [`DisplacementEngine::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReport {
    /// The composite index document
    pub index: CompositeIndex,
    /// Non-fatal conditions met along the way
    pub diagnostics: Vec<Diagnostic>,
    /// Coverage per signal, in signal order
    pub summaries: Vec<SignalSummary>,
}

/// Monthly series per signal plus what extraction tolerated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSignals {
    /// One (possibly empty) monthly series per configured signal
    pub series: BTreeMap<SignalId, MonthlySeries>,
    /// Missing sources, skipped points, fallbacks and empty signals
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes the displacement index from raw signal documents.
///
/// The engine is stateless across runs: identical documents, configuration
/// and `as_of` date always produce an identical index.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use displacement::{DisplacementEngine, EngineConfig, SignalDocuments};
///
/// let engine = DisplacementEngine::new(EngineConfig::default()).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
///
/// // No documents at all still yields every month of the window.
/// let report = engine.run(&SignalDocuments::new(), as_of).unwrap();
/// assert_eq!(report.index.monthly.len(), 38);
/// assert_eq!(report.index.monthly[0].score, 0.0);
/// assert_eq!(report.diagnostics.len(), 7);
/// ```
pub struct DisplacementEngine {
    config: EngineConfig,
    extractors: Vec<Box<dyn SignalExtractor>>,
    scorer: CompositeScorer,
}

impl fmt::Debug for DisplacementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplacementEngine")
            .field("config", &self.config)
            .field("extractors", &self.extractors.len())
            .finish_non_exhaustive()
    }
}

impl DisplacementEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scorer = CompositeScorer::new(config.signals.clone(), config.scorer())?;
        let extractors = extractors_with(config.derivation());
        Ok(Self {
            config,
            extractors,
            scorer,
        })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Extracts every configured signal onto months.
    ///
    /// Diagnostics are logged as they are collected.
    pub fn extract(&self, documents: &SignalDocuments) -> ExtractedSignals {
        let mut extracted = ExtractedSignals::default();

        for definition in &self.config.signals {
            let id = definition.id;
            let Some(extractor) = self.extractors.iter().find(|e| e.id() == id) else {
                continue;
            };

            let document = documents.get(id);
            let monthly = extractor.monthly(document);

            let mut found = Vec::new();
            if document.is_none() {
                found.push(Diagnostic::MissingSource { signal: id });
            } else if monthly.series.is_empty() {
                found.push(Diagnostic::EmptySignal { signal: id });
            }
            found.extend(
                monthly
                    .skipped
                    .into_iter()
                    .map(|detail| Diagnostic::MalformedField { signal: id, detail }),
            );
            found.extend(
                monthly
                    .hazards
                    .into_iter()
                    .map(|detail| Diagnostic::DivisionHazard { signal: id, detail }),
            );
            for diagnostic in &found {
                diagnostic.emit();
            }

            debug!(signal = %id, months = monthly.series.len(), "extracted signal");
            extracted.diagnostics.extend(found);
            extracted.series.insert(id, monthly.series);
        }

        extracted
    }

    /// Runs the full pipeline, stamping the document with `as_of`.
    pub fn run(&self, documents: &SignalDocuments, as_of: NaiveDate) -> Result<EngineReport> {
        let ExtractedSignals {
            series,
            mut diagnostics,
        } = self.extract(documents);

        let months = self.config.window.months();
        let window = self.scorer.score(&months, &series)?;

        for (id, bounds) in &window.bounds {
            if bounds.is_degenerate() && series.get(id).is_some_and(|s| !s.is_empty()) {
                let diagnostic = Diagnostic::DegenerateRange {
                    signal: *id,
                    value: bounds.min,
                };
                diagnostic.emit();
                diagnostics.push(diagnostic);
            }
        }

        let summaries: Vec<SignalSummary> = self
            .config
            .signals
            .iter()
            .map(|definition| {
                let signal = series.get(&definition.id);
                SignalSummary {
                    id: definition.id,
                    months: signal.map_or(0, BTreeMap::len),
                    months_in_window: signal.map_or(0, |s| {
                        s.range(self.config.window.start..=self.config.window.end)
                            .count()
                    }),
                    bounds: window.bounds.get(&definition.id).copied(),
                }
            })
            .collect();

        let index = CompositeIndex {
            metadata: OutputMetadata {
                source: self.config.output.source.clone(),
                last_updated: as_of,
                mock: documents.is_mock(),
                version: self.config.output.version.clone(),
            },
            weights: self.scorer.weights(),
            monthly: window.records,
            events: self.config.events.clone(),
        };

        if let Some(latest) = index.latest() {
            info!(
                window = %self.config.window,
                months = index.monthly.len(),
                signals_with_data = summaries.iter().filter(|s| s.months_in_window > 0).count(),
                latest_score = latest.score,
                phase = %latest.phase,
                diagnostics = diagnostics.len(),
                "composite index computed"
            );
        }

        Ok(EngineReport {
            index,
            diagnostics,
            summaries,
        })
    }
}
