use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Categorical severity of regional water scarcity.
///
/// Variants are declared from least to most severe, so the derived `Ord`
/// follows severity (`Low < Medium < ... < Emergency`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
    Critical,
    Emergency,
}

const LOW_TIPS: &[&str] = &[
    "Install water-efficient fixtures to maintain good water levels",
    "Collect rainwater for garden use",
    "Fix leaky faucets promptly",
];

const MEDIUM_TIPS: &[&str] = &[
    "Take shorter showers (5 minutes or less)",
    "Install water-saving toilets or place a brick in your tank",
    "Water plants early morning or evening to reduce evaporation",
];

const HIGH_TIPS: &[&str] = &[
    "Reuse greywater from laundry for toilets",
    "Use drought-resistant plants in landscaping",
    "Check for and fix household leaks immediately",
];

const CRITICAL_TIPS: &[&str] = &[
    "Limit outdoor water use to essential purposes only",
    "Use bucket instead of hose for car washing",
    "Install aerators on all faucets",
];

const EMERGENCY_TIPS: &[&str] = &[
    "Reduce shower time to 3 minutes maximum",
    "Consider dry cleaning methods where possible",
    "Report water waste in your community",
];

impl StressLevel {
    /// All levels, least severe first.
    pub const ALL: [StressLevel; 5] = [
        StressLevel::Low,
        StressLevel::Medium,
        StressLevel::High,
        StressLevel::Critical,
        StressLevel::Emergency,
    ];

    /// Level whose tips are shown when no region is selected.
    pub const DEFAULT_TIPS_LEVEL: StressLevel = StressLevel::Medium;

    /// Lowercase identifier used in CSV fixtures and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
            StressLevel::Critical => "critical",
            StressLevel::Emergency => "emergency",
        }
    }

    /// Hex fill color used for map markers and badges.
    pub fn color(&self) -> &'static str {
        match self {
            StressLevel::Low => "#E3F2FD",
            StressLevel::Medium => "#1E88E5",
            StressLevel::High => "#FFECB3",
            StressLevel::Critical => "#FF8F00",
            StressLevel::Emergency => "#BF360C",
        }
    }

    /// Short label for the map legend.
    pub fn legend_label(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low Stress",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
            StressLevel::Critical => "Critical",
            StressLevel::Emergency => "Emergency",
        }
    }

    /// Heading shown next to a region name, e.g. "Critical Water Stress".
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Water Stress", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    /// Conservation tips for households in a region at this level.
    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            StressLevel::Low => LOW_TIPS,
            StressLevel::Medium => MEDIUM_TIPS,
            StressLevel::High => HIGH_TIPS,
            StressLevel::Critical => CRITICAL_TIPS,
            StressLevel::Emergency => EMERGENCY_TIPS,
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the five stress levels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown water stress level '{0}'")]
pub struct UnknownStressLevel(pub String);

impl FromStr for StressLevel {
    type Err = UnknownStressLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        StressLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == lowered)
            .ok_or_else(|| UnknownStressLevel(s.to_string()))
    }
}
