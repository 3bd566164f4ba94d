//! Stage composition and annotation engine.
//!
//! Everything here is synchronous and storage-agnostic. The engine keeps a
//! [`PlanDocument`](crate::models::PlanDocument) structurally consistent with
//! its category and records stage discussions; persistence is the
//! [`Planner`](crate::Planner)'s job.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   EditSession   │    │    reconcile    │    │  StageCatalog   │
//! │ (fields, notes, │───▶│   (guarded by   │───▶│  (catalog.rs)   │
//! │  stage views)   │    │  guard module)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`reconcile`]: pure map-diff of a document's stages against the catalog
//! - [`guard`]: drift detection and self-healing
//! - [`fields`]: keyed field updates and the status workflow
//! - [`annotations`]: append-only per-stage comment threads
//! - [`session`]: orchestration of one document and its threads
//!
//! # Example
//!
//! ```rust
//! use lesson_core::{
//!     engine::EditSession,
//!     models::{AuthorRole, NewComment, PlanCategory},
//! };
//!
//! let mut session = EditSession::create(PlanCategory::Reading);
//! session.set_field(&"stages.warmUp.duration".parse()?, "5")?;
//!
//! let report = session.change_category(PlanCategory::Grammar);
//! assert!(report.kept.contains(&"warmUp".to_string()));
//!
//! session.append_comment(
//!     "clarification",
//!     NewComment::new("Coordinator", AuthorRole::Coordinator, "Clarify ICQs"),
//! )?;
//! assert_eq!(session.thread_for("clarification").len(), 1);
//! # Ok::<(), lesson_core::PlannerError>(())
//! ```

pub mod annotations;
pub mod fields;
pub mod guard;
pub mod reconcile;
pub mod session;


pub use annotations::AnnotationStore;
pub use fields::{set_field, transition_status};
pub use guard::{StageDrift, detect_drift, ensure_consistent};
pub use reconcile::{ReconcileReport, reconcile, reconcile_with_report};
pub use session::{EditSession, StageView};
