//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share one message style and show the
//! affected plan.

use std::fmt;

use serde::Serialize;

use crate::{
    engine::ReconcileReport,
    models::{Comment, PlanCategory, PlanDocument},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use lesson_core::{
///     display::CreateResult,
///     models::{PlanCategory, PlanDocument},
/// };
///
/// let mut plan = PlanDocument::new(PlanCategory::Lexis);
/// plan.id = Some(1);
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<PlanDocument> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created plan with ID: {}",
            self.resource.id.unwrap_or_default()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Comment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added comment {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<PlanDocument> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated plan with ID: {}",
            self.resource.id.unwrap_or_default()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<PlanDocument> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.title(),
            self.resource.id.unwrap_or_default()
        )
    }
}

/// Outcome of switching a stored plan to another category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryChange {
    /// Category before the change
    pub from: PlanCategory,
    /// The plan as saved after the change
    pub plan: PlanDocument,
    /// Which stages were kept, created and discarded
    pub report: ReconcileReport,
}

impl fmt::Display for CategoryChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Changed plan {} from {} to {}",
            self.plan.id.unwrap_or_default(),
            self.from,
            self.plan.category
        )?;
        writeln!(f)?;

        let sections = [
            ("Kept", &self.report.kept),
            ("Added", &self.report.created),
            ("Discarded", &self.report.dropped),
        ];
        for (label, keys) in sections {
            if !keys.is_empty() {
                writeln!(f, "- {label}: {}", keys.join(", "))?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}
