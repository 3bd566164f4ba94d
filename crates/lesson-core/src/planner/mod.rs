//! High-level planner API for lesson plans and their stage threads.
//!
//! The [`Planner`] connects interfaces (CLI, MCP) to the engine and the
//! SQLite store. Storage work runs on tokio's blocking pool with one
//! connection per call; engine work is synchronous.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers, │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │comment_handlers)│    │  comment_ops)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                               │
//!                               ▼
//!                        engine::EditSession
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Load, save, list and delete plan documents
//! - [`comment_ops`]: Load and store stage threads
//! - [`plan_handlers`]: Interface-facing plan operations (create, edit,
//!   change category, list summaries, delete with confirmation)
//! - [`comment_handlers`]: Interface-facing comment operations
//!
//! Every document leaving the store passes the consistency guard, and every
//! document entering it is guarded first, so a stray stage key never reaches
//! a caller or the database.
//!
//! # Usage Examples
//!
//! ```rust
//! use lesson_core::{
//!     PlannerBuilder,
//!     params::{AddComment, ChangeCategory, CreatePlan, SetField},
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
//!         class_name: Some("A2 Morning".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! let id = plan.id.unwrap_or_default();
//!
//! planner
//!     .set_field(&SetField {
//!         id,
//!         field: "stages.warmUp.duration".to_string(),
//!         value: "5".to_string(),
//!     })
//!     .await?;
//! planner
//!     .change_category(&ChangeCategory {
//!         id,
//!         category: "grammar".to_string(),
//!     })
//!     .await?;
//! planner
//!     .add_comment(&AddComment {
//!         id,
//!         stage: "clarification".to_string(),
//!         author: "Coordinator".to_string(),
//!         role: "coordinator".to_string(),
//!         message: "Clarify ICQs".to_string(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod builder;
pub mod comment_handlers;
pub mod comment_ops;
pub mod plan_handlers;
pub mod plan_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for managing lesson plans.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
