//! Core library for the lesson-plan editor.
//!
//! Lesson plans are documents whose stage set is dictated by their category:
//! a reading lesson has gist and detail reading stages, a grammar lesson has
//! clarification and practice stages, and so on. This crate keeps every plan
//! consistent with its category's stage catalog, carries stage content across
//! category changes, records per-stage discussion threads, and stores plans
//! in SQLite.
//!
//! # Layers
//!
//! - [`catalog`]: the static stage list of every category
//! - [`models`]: plan documents, stages, comments and their value types
//! - [`engine`]: reconciliation, drift repair, field edits and threads;
//!   synchronous and storage-agnostic
//! - [`db`]: SQLite persistence
//! - [`planner`]: async API tying the engine to the database
//! - [`display`]: markdown formatting for terminals and MCP tools
//! - [`params`]: interface-neutral operation parameters
//!
//! # Quick Start
//!
//! ```rust
//! use lesson_core::{
//!     PlannerBuilder,
//!     params::{ChangeCategory, CreatePlan, ListPlans},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("lessons.db")
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         category: "reading".to_string(),
//!         main_aim: Some("Reading for gist".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", plan);
//!
//! let change = planner
//!     .change_category(&ChangeCategory {
//!         id: plan.id.unwrap_or_default(),
//!         category: "grammar".to_string(),
//!     })
//!     .await?;
//! println!("{}", change);
//!
//! let plans = planner.list_plans_summary(&ListPlans::default()).await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

pub use db::Database;
pub use display::{
    CategoryChange, CreateResult, DeleteResult, OperationStatus, PlanSummaries, StageListing,
    Thread, UpdateResult,
};
pub use engine::{AnnotationStore, EditSession, ReconcileReport, StageDrift};
pub use error::{PlannerError, Result};
pub use models::{
    AuthorRole, Comment, CommentThread, FieldPath, InteractionPattern, NewComment, PlanCategory,
    PlanDocument, PlanFilter, PlanStatus, PlanSummary, StageContent, StageDuration,
};
pub use params::{
    AddComment, ChangeCategory, CreatePlan, DeletePlan, Id, ListPlans, ListStages, SetField,
    ShowThread,
};
pub use planner::{Planner, PlannerBuilder};
