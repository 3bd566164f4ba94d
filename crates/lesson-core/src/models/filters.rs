//! Filter types for querying plans.

use super::{PlanCategory, PlanStatus};
use crate::error::Result;

/// Filter options for querying plans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanFilter {
    /// Only plans of this category
    pub category: Option<PlanCategory>,

    /// Only plans in this review state
    pub status: Option<PlanStatus>,

    /// Filter by teacher name (case-insensitive partial match)
    pub teacher_contains: Option<String>,
}

impl TryFrom<&crate::params::ListPlans> for PlanFilter {
    type Error = crate::PlannerError;

    /// Convert ListPlans parameters to a PlanFilter, parsing the textual
    /// category and status.
    ///
    /// ```rust
    /// use lesson_core::{
    ///     models::{PlanCategory, PlanFilter},
    ///     params::ListPlans,
    /// };
    ///
    /// let params = ListPlans {
    ///     category: Some("grammar".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = PlanFilter::try_from(&params)?;
    /// assert_eq!(filter.category, Some(PlanCategory::Grammar));
    /// assert_eq!(filter.status, None);
    /// # Ok::<(), lesson_core::PlannerError>(())
    /// ```
    fn try_from(params: &crate::params::ListPlans) -> Result<Self> {
        let category = params
            .category
            .as_deref()
            .map(str::parse::<PlanCategory>)
            .transpose()?;
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<PlanStatus>().map_err(|reason| {
                    crate::PlannerError::invalid_input("status").with_reason(reason)
                })
            })
            .transpose()?;

        Ok(Self {
            category,
            status,
            teacher_contains: params.teacher.clone(),
        })
    }
}
