//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with consistent structure and a message
//! for the empty case.

use std::fmt;

use serde::Serialize;

use crate::{
    catalog::StageDefinition,
    models::{CommentThread, PlanCategory, PlanSummary},
};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use lesson_core::{
///     display::PlanSummaries,
///     models::{PlanCategory, PlanDocument, PlanSummary},
/// };
///
/// let mut plan = PlanDocument::new(PlanCategory::Reading);
/// plan.id = Some(1);
/// plan.class_name = "A2 Morning".to_string();
///
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// let output = format!("{}", summaries);
/// assert!(output.contains("A2 Morning"));
/// assert!(output.contains("(0/11 stages)"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{}", plan)?;
            }
            Ok(())
        }
    }
}

/// The comment thread of one stage of one plan.
#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    pub plan_id: u64,
    pub stage_key: String,
    pub comments: CommentThread,
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Comments on `{}` (plan {})",
            self.stage_key, self.plan_id
        )?;
        writeln!(f)?;

        if self.comments.is_empty() {
            return writeln!(f, "No comments on this stage.");
        }

        for comment in &self.comments {
            write!(f, "{comment}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The catalog entry of one category: its stages in teaching order.
#[derive(Debug, Clone, Serialize)]
pub struct StageListing {
    pub category: PlanCategory,
    pub stages: &'static [StageDefinition],
}

impl fmt::Display for StageListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} lesson stages", self.category)?;
        writeln!(f)?;

        for (index, stage) in self.stages.iter().enumerate() {
            write!(f, "{}. **{}** `{}`", index + 1, stage.display_name, stage.key)?;
            if stage.hints.optional {
                write!(f, " (optional)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        catalog,
        engine::AnnotationStore,
        models::{AuthorRole, NewComment, PlanStatus},
    };

    fn summary(id: u64, title: &str) -> PlanSummary {
        PlanSummary {
            id,
            title: title.to_string(),
            teacher: "Ana Souza".to_string(),
            category: PlanCategory::Grammar,
            date: None,
            status: PlanStatus::UnderReview,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            total_stages: 9,
            filled_stages: 3,
            comment_count: 2,
        }
    }

    #[test]
    fn test_plan_summaries_display() {
        let summaries = PlanSummaries(vec![summary(1, "B1 Evening: Past simple")]);
        let output = format!("{}", summaries);
        assert!(output.contains("## B1 Evening: Past simple (ID: 1) (3/9 stages)"));
        assert!(output.contains("- **Category**: Grammar"));
        assert!(output.contains("- **Status**: ➤ Under Review"));
        assert!(output.contains("- **Comments**: 2"));

        let empty = PlanSummaries(vec![]);
        assert_eq!(format!("{}", empty), "No plans found.\n");

        let summaries = PlanSummaries(vec![summary(1, "First"), summary(2, "Second")]);
        let output = format!("{}", summaries);
        assert!(output.find("First").unwrap() < output.find("Second").unwrap());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries.0[1].id, 2);
    }

    #[test]
    fn test_thread_display() {
        let mut store = AnnotationStore::new();
        store
            .append(
                "clarification",
                NewComment::new("Bea", AuthorRole::Coordinator, "Clarify ICQs"),
            )
            .unwrap();
        let thread = Thread {
            plan_id: 4,
            stage_key: "clarification".to_string(),
            comments: store.threads().next().unwrap().1.clone(),
        };

        let output = thread.to_string();
        assert!(output.starts_with("## Comments on `clarification` (plan 4)"));
        assert!(output.contains("**Bea** (coordinator, "));
        assert!(output.contains("Clarify ICQs"));

        let empty = Thread {
            plan_id: 4,
            stage_key: "warmUp".to_string(),
            comments: CommentThread::new(),
        };
        assert!(empty.to_string().contains("No comments on this stage."));
    }

    #[test]
    fn test_stage_listing_display() {
        let listing = StageListing {
            category: PlanCategory::Grammar,
            stages: catalog::stages_for(PlanCategory::Grammar),
        };
        let output = listing.to_string();
        assert!(output.starts_with("# Grammar lesson stages"));
        assert!(output.contains("1. **Warm-up** `warmUp`\n"));
        assert!(output.contains("`custom` (optional)"));
        assert_eq!(output.lines().filter(|l| l.contains('`')).count(), 9);
    }
}
