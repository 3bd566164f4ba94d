//! Plan summary types and functionality.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{PlanCategory, PlanDocument, PlanStatus};

/// Summary information about a plan with stage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title derived from class name and main aim
    pub title: String,
    /// Teacher delivering the lesson
    pub teacher: String,
    /// Lesson category
    pub category: PlanCategory,
    /// Day of the lesson
    pub date: Option<Date>,
    /// Review state
    pub status: PlanStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of stages
    pub total_stages: u32,
    /// Number of stages with any content
    pub filled_stages: u32,
    /// Number of comments across all stage threads
    pub comment_count: u32,
}

impl PlanSummary {
    /// Create a PlanSummary from a plan and its comment count.
    ///
    /// Unsaved plans get ID 0.
    pub fn from_plan(plan: &PlanDocument, comment_count: u32) -> Self {
        let total_stages = plan.stages.len() as u32;
        let filled_stages = plan
            .stages
            .iter()
            .filter(|stage| stage.content.is_filled())
            .count() as u32;

        Self {
            id: plan.id.unwrap_or_default(),
            title: plan.title(),
            teacher: plan.teacher.clone(),
            category: plan.category,
            date: plan.date,
            status: plan.status,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_stages,
            filled_stages,
            comment_count,
        }
    }
}

impl From<&PlanDocument> for PlanSummary {
    fn from(plan: &PlanDocument) -> Self {
        Self::from_plan(plan, 0)
    }
}
