//! Engine configuration and named presets.
//!
//! Everything that shapes a run lives here: per-signal weights, directions
//! and range policies, the relabeling threshold, trend dead band, fallback
//! value, output window, milestone events and output metadata.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use derive_more::Display;
use displacement_combine::{
    DEFAULT_TREND_DEAD_BAND, RangePolicy, ScorerConfig, SignalDefinition, validate_definitions,
};
use displacement_earnings::{DEFAULT_RELABELING_THRESHOLD, DerivationConfig};
use displacement_signals::registry::available_signals;
use displacement_traits::{DisplacementError, Month, Result, SignalId};
use serde::{Deserialize, Serialize};

/// First month of the default window (release of ChatGPT).
pub const DEFAULT_WINDOW_START: Month = Month::from_parts(2022, 11);

/// Last month of the default window.
pub const DEFAULT_WINDOW_END: Month = Month::from_parts(2025, 12);

/// Inclusive range of output months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    /// First month
    pub start: Month,
    /// Last month
    pub end: Month,
}

impl Default for MonthWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            end: DEFAULT_WINDOW_END,
        }
    }
}

impl MonthWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: Month, end: Month) -> Result<Self> {
        if start > end {
            return Err(DisplacementError::Configuration(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Every month of the window in order.
    pub fn months(&self) -> Vec<Month> {
        Month::range_inclusive(self.start, self.end)
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Category of a milestone event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A model or product release.
    #[display("ai_release")]
    AiRelease,
    /// A regulatory milestone.
    #[display("regulatory")]
    Regulatory,
    /// An earnings disclosure.
    #[display("earnings")]
    Earnings,
}

/// A dated milestone passed through to the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Month of the event
    pub date: Month,
    /// Short label
    pub label: String,
    /// Event category
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl Event {
    fn new(date: Month, label: &str, kind: EventKind) -> Self {
        Self {
            date,
            label: label.to_string(),
            kind,
        }
    }
}

/// The default milestone list.
pub fn default_events() -> Vec<Event> {
    use EventKind::{AiRelease, Earnings, Regulatory};
    vec![
        Event::new(Month::from_parts(2022, 11), "ChatGPT Launch", AiRelease),
        Event::new(Month::from_parts(2023, 3), "GPT-4 Release", AiRelease),
        Event::new(Month::from_parts(2023, 7), "Claude 2 Launch", AiRelease),
        Event::new(Month::from_parts(2024, 3), "Claude 3 Launch", AiRelease),
        Event::new(Month::from_parts(2024, 6), "EU AI Act Final", Regulatory),
        Event::new(Month::from_parts(2024, 11), "GPT-4o Launch", AiRelease),
        Event::new(Month::from_parts(2025, 2), "Claude 3.5 Opus", AiRelease),
        Event::new(Month::from_parts(2025, 6), "Accenture AI Revenue $3B", Earnings),
    ]
}

/// Named range presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    /// Each signal scaled against its own observed min and max.
    #[default]
    #[display("observed")]
    Observed,
    /// Each signal scaled against fixed plausible bounds.
    #[display("theoretical")]
    Theoretical,
}

impl FromStr for RangePreset {
    type Err = DisplacementError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "observed" => Ok(Self::Observed),
            "theoretical" => Ok(Self::Theoretical),
            other => Err(DisplacementError::Configuration(format!(
                "unknown range preset '{other}'"
            ))),
        }
    }
}

/// Fixed plausible bounds for a signal.
pub const fn theoretical_range(id: SignalId) -> RangePolicy {
    let (min, max) = match id {
        // Thousands of employees
        SignalId::Employment => (1350.0, 1620.0),
        // $K per employee per quarter
        SignalId::RevPerEmployee => (12.0, 50.0),
        // $M per month
        SignalId::VcFunding => (0.0, 900.0),
        SignalId::JobRatio => (0.0, 0.55),
        SignalId::Trends | SignalId::Github | SignalId::Regulatory => (0.0, 100.0),
    };
    RangePolicy::Theoretical { min, max }
}

/// Metadata written into the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `metadata.source`
    pub source: String,
    /// `metadata.version`
    pub version: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source: "Displacement Curve Composite".to_string(),
            version: "1.0".to_string(),
        }
    }
}

/// Configuration for a [`DisplacementEngine`](crate::DisplacementEngine) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// One definition per signal
    pub signals: Vec<SignalDefinition>,

    /// Relabeling index above which a firm quarter is flagged (default: 3.0)
    pub relabeling_threshold: f64,

    /// Month-over-month change treated as flat (default: 0.5)
    pub trend_dead_band: f64,

    /// Raw value recorded for months without data (default: 0.0)
    pub fallback_raw_value: f64,

    /// Output months
    pub window: MonthWindow,

    /// Milestones passed through to the output
    pub events: Vec<Event>,

    /// Output metadata
    pub output: OutputConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::preset(RangePreset::Observed)
    }
}

impl EngineConfig {
    /// Builds the default configuration with every signal on `preset` ranges.
    pub fn preset(preset: RangePreset) -> Self {
        let signals = available_signals()
            .into_iter()
            .map(|info| SignalDefinition {
                id: info.id,
                weight: info.weight,
                direction: info.direction,
                range: match preset {
                    RangePreset::Observed => RangePolicy::Observed,
                    RangePreset::Theoretical => theoretical_range(info.id),
                },
            })
            .collect();

        Self {
            signals,
            relabeling_threshold: DEFAULT_RELABELING_THRESHOLD,
            trend_dead_band: DEFAULT_TREND_DEAD_BAND,
            fallback_raw_value: 0.0,
            window: MonthWindow::default(),
            events: default_events(),
            output: OutputConfig::default(),
        }
    }

    /// Observed-range preset.
    pub fn observed() -> Self {
        Self::preset(RangePreset::Observed)
    }

    /// Theoretical-range preset.
    pub fn theoretical() -> Self {
        Self::preset(RangePreset::Theoretical)
    }

    /// Replaces every signal's range policy with the preset's.
    #[must_use]
    pub fn with_ranges(mut self, preset: RangePreset) -> Self {
        for definition in &mut self.signals {
            definition.range = match preset {
                RangePreset::Observed => RangePolicy::Observed,
                RangePreset::Theoretical => theoretical_range(definition.id),
            };
        }
        self
    }

    /// Parses a configuration from JSON; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DisplacementError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Looks up one signal's definition.
    pub fn definition(&self, id: SignalId) -> Option<&SignalDefinition> {
        self.signals.iter().find(|d| d.id == id)
    }

    /// Derivation settings for the earnings signal.
    pub const fn derivation(&self) -> DerivationConfig {
        DerivationConfig {
            relabeling_threshold: self.relabeling_threshold,
        }
    }

    /// Scorer settings.
    pub const fn scorer(&self) -> ScorerConfig {
        ScorerConfig {
            fallback_raw_value: self.fallback_raw_value,
            trend_dead_band: self.trend_dead_band,
        }
    }

    /// Checks the whole configuration; every failure here is fatal.
    pub fn validate(&self) -> Result<()> {
        validate_definitions(&self.signals)?;

        if !self.relabeling_threshold.is_finite() {
            return Err(DisplacementError::Configuration(
                "relabeling threshold must be finite".to_string(),
            ));
        }
        if !self.trend_dead_band.is_finite() || self.trend_dead_band < 0.0 {
            return Err(DisplacementError::Configuration(format!(
                "trend dead band must be a non-negative number, got {}",
                self.trend_dead_band
            )));
        }
        if !self.fallback_raw_value.is_finite() {
            return Err(DisplacementError::Configuration(
                "fallback raw value must be finite".to_string(),
            ));
        }
        if self.window.start > self.window.end {
            return Err(DisplacementError::Configuration(format!(
                "output window {} is empty",
                self.window
            )));
        }
        Ok(())
    }
}
