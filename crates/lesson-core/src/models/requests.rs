//! Field paths addressing editable parts of a plan.

use std::{fmt, str::FromStr};

use crate::error::PlannerError;

/// Metadata field of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    ClassName,
    Teacher,
    Date,
    Time,
    MainAim,
    SubsidiaryAim,
    Status,
}

impl PlanField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanField::ClassName => "className",
            PlanField::Teacher => "teacher",
            PlanField::Date => "date",
            PlanField::Time => "time",
            PlanField::MainAim => "mainAim",
            PlanField::SubsidiaryAim => "subsidiaryAim",
            PlanField::Status => "status",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "className" | "class_name" => Some(PlanField::ClassName),
            "teacher" => Some(PlanField::Teacher),
            "date" => Some(PlanField::Date),
            "time" => Some(PlanField::Time),
            "mainAim" | "main_aim" => Some(PlanField::MainAim),
            "subsidiaryAim" | "subsidiary_aim" => Some(PlanField::SubsidiaryAim),
            "status" => Some(PlanField::Status),
            _ => None,
        }
    }
}

/// Content field of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageField {
    ActivityDescription,
    InstructionsAndChecks,
    Duration,
    InteractionPattern,
    AnticipatedProblems,
}

impl StageField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageField::ActivityDescription => "activityDescription",
            StageField::InstructionsAndChecks => "instructionsAndChecks",
            StageField::Duration => "duration",
            StageField::InteractionPattern => "interactionPattern",
            StageField::AnticipatedProblems => "anticipatedProblems",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "activityDescription" | "activity_description" => {
                Some(StageField::ActivityDescription)
            }
            "instructionsAndChecks" | "instructions_and_checks" => {
                Some(StageField::InstructionsAndChecks)
            }
            "duration" => Some(StageField::Duration),
            "interactionPattern" | "interaction_pattern" => Some(StageField::InteractionPattern),
            "anticipatedProblems" | "anticipated_problems" => {
                Some(StageField::AnticipatedProblems)
            }
            _ => None,
        }
    }
}

/// Address of a single editable value: a plan metadata field or
/// `stages.<key>.<field>`.
///
/// ```rust
/// use lesson_core::models::{FieldPath, PlanField, StageField};
///
/// let path: FieldPath = "mainAim".parse()?;
/// assert_eq!(path, FieldPath::Plan(PlanField::MainAim));
///
/// let path: FieldPath = "stages.warmUp.duration".parse()?;
/// assert_eq!(
///     path,
///     FieldPath::Stage {
///         key: "warmUp".to_string(),
///         field: StageField::Duration,
///     }
/// );
/// # Ok::<(), lesson_core::PlannerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Plan(PlanField),
    Stage { key: String, field: StageField },
}

impl FieldPath {
    /// Path for a stage field.
    pub fn stage(key: impl Into<String>, field: StageField) -> Self {
        FieldPath::Stage {
            key: key.into(),
            field,
        }
    }
}

impl FromStr for FieldPath {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let unknown = || PlannerError::UnknownField {
            path: path.to_string(),
        };

        if path == "category" {
            return Err(PlannerError::invalid_input("category").with_reason(
                "the category is changed through the stage reconciler, not set as a field",
            ));
        }

        match path.split('.').collect::<Vec<_>>().as_slice() {
            [field] => PlanField::parse(field).map(FieldPath::Plan).ok_or_else(unknown),
            ["stages", key, field] if !key.is_empty() => StageField::parse(field)
                .map(|field| FieldPath::stage(*key, field))
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Plan(field) => write!(f, "{}", field.as_str()),
            FieldPath::Stage { key, field } => write!(f, "stages.{key}.{}", field.as_str()),
        }
    }
}
