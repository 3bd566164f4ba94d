//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get wrapper types here so each context
//! (lists, threads, create/update/delete results) formats consistently. All
//! output is markdown, rendered by the CLI's terminal renderer or returned
//! as-is from MCP tools.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers &   │    │   Formatted     │
//! │ (PlanDocument,  │───▶│  Result Types   │───▶│    Output       │
//! │    Comment)     │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: PlanSummaries, Thread, StageListing
//! - [`results`]: CreateResult, UpdateResult, DeleteResult, CategoryChange
//! - [`status`]: OperationStatus messages
//! - [`datetime`]: Timestamp and lesson schedule formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use lesson_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::{PlanCategory, PlanDocument},
//! };
//!
//! let mut plan = PlanDocument::new(PlanCategory::Grammar);
//! plan.id = Some(1);
//!
//! let result = UpdateResult::with_changes(plan, vec!["Set teacher".to_string()]);
//! assert!(result.to_string().contains("Changes made:"));
//!
//! let status = OperationStatus::success("Plan saved".to_string());
//! assert_eq!(status.to_string(), "Success: Plan saved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{PlanSummaries, StageListing, Thread};
pub use datetime::{LessonSchedule, LocalDateTime};
pub use results::{CategoryChange, CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
