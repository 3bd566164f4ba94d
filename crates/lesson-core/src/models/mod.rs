//! Data models for lesson plans, stages and stage comments.
//!
//! This module contains the domain models of the lesson-plan editor. Display
//! implementations for these models live in [`crate::display::models`] to keep
//! data structures apart from presentation logic.
//!
//! # Shape of a Plan
//!
//! A [`PlanDocument`] holds fixed metadata (class, teacher, aims, schedule,
//! review status) and a [`StageMap`] whose keys are dictated by the plan's
//! [`PlanCategory`] through the [`crate::catalog`]. Stage content is a plain
//! [`StageContent`] record; the keys come and go only through the
//! reconciler in [`crate::engine`].
//!
//! Comments are not part of the document. They live in per-stage
//! [`CommentThread`]s held by an [`crate::engine::AnnotationStore`].
//!
//! # Examples
//!
//! ```rust
//! use lesson_core::models::{PlanCategory, PlanDocument};
//!
//! let plan = PlanDocument::new(PlanCategory::Grammar);
//! assert_eq!(plan.stages.len(), 9);
//! assert!(plan.stage("clarification").is_some());
//! println!("{}", plan); // Markdown with one section per stage
//! ```

pub mod category;
pub mod comment;
pub mod filters;
pub mod plan;
pub mod requests;
pub mod stage;
pub mod status;
pub mod summary;


pub use category::PlanCategory;
pub use comment::{Comment, CommentThread, NewComment};
pub use filters::PlanFilter;
pub use plan::PlanDocument;
pub use requests::{FieldPath, PlanField, StageField};
pub use stage::{InteractionPattern, Stage, StageContent, StageDuration, StageMap};
pub use status::{AuthorRole, PlanStatus};
pub use summary::PlanSummary;
