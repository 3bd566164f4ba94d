//! Plan categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Lesson type that determines which stages a plan contains.
///
/// The set is closed; adding a category means adding a catalog entry for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlanCategory {
    /// Receptive skills lesson built around a reading text
    #[default]
    Reading,

    /// Receptive skills lesson built around a recording
    Listening,

    /// Systems lesson presenting a grammar point
    Grammar,

    /// Systems lesson presenting vocabulary
    Lexis,

    /// Pronunciation and accuracy drilling lesson
    MixedDrill,
}

impl PlanCategory {
    /// Every category, in catalog order.
    pub const ALL: [PlanCategory; 5] = [
        PlanCategory::Reading,
        PlanCategory::Listening,
        PlanCategory::Grammar,
        PlanCategory::Lexis,
        PlanCategory::MixedDrill,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCategory::Reading => "reading",
            PlanCategory::Listening => "listening",
            PlanCategory::Grammar => "grammar",
            PlanCategory::Lexis => "lexis",
            PlanCategory::MixedDrill => "mixed-drill",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanCategory::Reading => "Reading",
            PlanCategory::Listening => "Listening",
            PlanCategory::Grammar => "Grammar",
            PlanCategory::Lexis => "Lexis",
            PlanCategory::MixedDrill => "Mixed Drill",
        }
    }
}

impl FromStr for PlanCategory {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" => Ok(PlanCategory::Reading),
            "listening" => Ok(PlanCategory::Listening),
            "grammar" => Ok(PlanCategory::Grammar),
            "lexis" => Ok(PlanCategory::Lexis),
            "mixed-drill" | "mixed_drill" | "mixeddrill" => Ok(PlanCategory::MixedDrill),
            _ => Err(PlannerError::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}
