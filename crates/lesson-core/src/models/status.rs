//! Status enumerations for plans and comment authors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review state of a lesson plan.
///
/// Plans move forward through the review workflow:
///
/// ```text
/// draft        -> under_review
/// under_review -> approved
/// under_review -> draft        (returned for changes)
/// ```
///
/// Staying in the same state is always allowed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan is being written
    #[default]
    Draft,

    /// Plan has been submitted to a coordinator
    UnderReview,

    /// Plan has been signed off
    Approved,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "under_review" | "under-review" | "underreview" | "review" => {
                Ok(PlanStatus::UnderReview)
            }
            "approved" => Ok(PlanStatus::Approved),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::UnderReview => "under_review",
            PlanStatus::Approved => "approved",
        }
    }

    /// Check whether moving from `self` to `to` follows the review workflow.
    pub fn can_transition_to(self, to: PlanStatus) -> bool {
        matches!(
            (self, to),
            (PlanStatus::Draft, PlanStatus::UnderReview)
                | (PlanStatus::UnderReview, PlanStatus::Approved)
                | (PlanStatus::UnderReview, PlanStatus::Draft)
        ) || self == to
    }

    /// Get status with a consistent icon for display.
    ///
    /// ```rust
    /// use lesson_core::models::PlanStatus;
    ///
    /// assert_eq!(PlanStatus::Approved.with_icon(), "✓ Approved");
    /// assert_eq!(PlanStatus::UnderReview.with_icon(), "➤ Under Review");
    /// assert_eq!(PlanStatus::Draft.with_icon(), "○ Draft");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PlanStatus::Approved => "✓ Approved",
            PlanStatus::UnderReview => "➤ Under Review",
            PlanStatus::Draft => "○ Draft",
        }
    }
}

/// Role a comment author speaks with.
///
/// Passed explicitly with every comment; there is no ambient "current role".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// Academic coordinator reviewing the plan
    Coordinator,

    /// Teacher who wrote the plan
    Author,
}

impl FromStr for AuthorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coordinator" => Ok(AuthorRole::Coordinator),
            "author" | "teacher" => Ok(AuthorRole::Author),
            _ => Err(format!("Invalid author role: {s}")),
        }
    }
}

impl AuthorRole {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorRole::Coordinator => "coordinator",
            AuthorRole::Author => "author",
        }
    }
}
