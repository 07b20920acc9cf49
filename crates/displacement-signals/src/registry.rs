//! Signal registry for discovering and categorizing the composite's signals.
//!
//! The registry is the single source of the default weight and direction of
//! each signal; configuration presets are built from it.

use displacement_traits::{Direction, Quantity, SignalId};
use serde::{Deserialize, Serialize};

/// Signal category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Headcount and hiring signals
    Labor,
    /// Revenue and investment signals
    Capital,
    /// Attention and open-source activity signals
    Adoption,
    /// Regulatory activity signals
    Policy,
}

impl SignalCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Labor => "Headcount and job-posting mix in knowledge work",
            Self::Capital => "Firm productivity and venture investment in AI",
            Self::Adoption => "Public attention and developer activity around AI",
            Self::Policy => "Regulatory guidance on AI",
        }
    }
}

/// Native resolution of a signal's source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// One value per month
    Monthly,
    /// One value per quarter, expanded to months
    Quarterly,
}

/// Metadata about a signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Signal identifier
    pub id: SignalId,

    /// Category classification
    pub category: SignalCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Native resolution of the source data
    pub resolution: Resolution,

    /// Flow or level, for quarterly expansion
    pub quantity: Quantity,

    /// Default direction
    pub direction: Direction,

    /// Default weight in the composite
    pub weight: f64,

    /// Source document path relative to the data directory
    pub source_path: &'static str,
}

/// Get information about all available signals, in canonical order.
#[must_use]
pub fn available_signals() -> Vec<SignalInfo> {
    vec![
        // Labor signals
        SignalInfo {
            id: SignalId::Employment,
            category: SignalCategory::Labor,
            description: "Professional and business services headcount (BLS CES)",
            resolution: Resolution::Monthly,
            quantity: Quantity::Level,
            direction: Direction::LowerIsWorse,
            weight: 0.25,
            source_path: "bls/processed/employment.json",
        },
        // Capital signals
        SignalInfo {
            id: SignalId::RevPerEmployee,
            category: SignalCategory::Capital,
            description: "Average quarterly revenue per employee across IT-services firms",
            resolution: Resolution::Quarterly,
            quantity: Quantity::Level,
            direction: Direction::HigherIsWorse,
            weight: 0.20,
            source_path: "earnings/processed/normalized.json",
        },
        SignalInfo {
            id: SignalId::VcFunding,
            category: SignalCategory::Capital,
            description: "Venture funding raised by AI startups ($M)",
            resolution: Resolution::Quarterly,
            quantity: Quantity::Flow,
            direction: Direction::HigherIsWorse,
            weight: 0.15,
            source_path: "vc/processed/funding.json",
        },
        SignalInfo {
            id: SignalId::JobRatio,
            category: SignalCategory::Labor,
            description: "AI-skill job postings relative to traditional-skill postings",
            resolution: Resolution::Monthly,
            quantity: Quantity::Level,
            direction: Direction::HigherIsWorse,
            weight: 0.15,
            source_path: "jobs/processed/postings.json",
        },
        // Adoption signals
        SignalInfo {
            id: SignalId::Trends,
            category: SignalCategory::Adoption,
            description: "Search interest in AI displacement terms (0-100)",
            resolution: Resolution::Monthly,
            quantity: Quantity::Level,
            direction: Direction::HigherIsWorse,
            weight: 0.10,
            source_path: "trends/processed/search_interest.json",
        },
        SignalInfo {
            id: SignalId::Github,
            category: SignalCategory::Adoption,
            description: "Open-source AI agent and framework activity",
            resolution: Resolution::Monthly,
            quantity: Quantity::Level,
            direction: Direction::HigherIsWorse,
            weight: 0.10,
            source_path: "github/processed/activity.json",
        },
        // Policy signals
        SignalInfo {
            id: SignalId::Regulatory,
            category: SignalCategory::Policy,
            description: "Cumulative AI-related regulatory documents",
            resolution: Resolution::Quarterly,
            quantity: Quantity::Level,
            direction: Direction::HigherIsWorse,
            weight: 0.05,
            source_path: "regulatory/processed/guidance.json",
        },
    ]
}

/// Get all signals in a specific category.
#[must_use]
pub fn signals_by_category(category: &SignalCategory) -> Vec<SignalInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific signal.
#[must_use]
pub fn get_signal_info(id: SignalId) -> Option<SignalInfo> {
    available_signals().into_iter().find(|info| info.id == id)
}

/// Get all signal categories with signals.
#[must_use]
pub fn available_categories() -> Vec<SignalCategory> {
    let mut categories: Vec<_> = available_signals()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
