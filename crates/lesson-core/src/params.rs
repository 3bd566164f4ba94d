//! Parameter structures for lesson-plan operations
//!
//! Shared parameter structures used by every interface (CLI, MCP) without
//! framework-specific derives. Interface layers wrap these with their own
//! derives and convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Values that name a category, status, role or field stay textual here and
//! are parsed by the [`Planner`](crate::Planner), so every interface reports
//! the same errors for the same bad input.
//!
//! ```ignore
//! // In the CLI crate
//! #[derive(Args)]
//! pub struct ChangeCategoryArgs {
//!     pub id: u64,
//!     pub category: String,
//! }
//!
//! impl From<ChangeCategoryArgs> for ChangeCategory {
//!     fn from(args: ChangeCategoryArgs) -> Self {
//!         Self { id: args.id, category: args.category }
//!     }
//! }
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just a plan ID.
///
/// Used for show_plan and open_session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for creating a new lesson plan.
///
/// Only the category is required; it decides the stage set. Everything else
/// can be filled in later with [`SetField`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Lesson category: reading, listening, grammar, lexis or mixed-drill
    pub category: String,
    /// Class or group the lesson is for
    pub class_name: Option<String>,
    /// Teacher delivering the lesson
    pub teacher: Option<String>,
    /// Lesson date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Lesson start time (HH:MM)
    pub time: Option<String>,
    /// Main aim of the lesson
    pub main_aim: Option<String>,
    /// Subsidiary aim of the lesson
    pub subsidiary_aim: Option<String>,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Only plans of this category
    pub category: Option<String>,
    /// Only plans in this review status ('draft', 'under_review', 'approved')
    pub status: Option<String>,
    /// Only plans whose teacher contains this text (case-insensitive)
    pub teacher: Option<String>,
}

/// Parameters for setting one field of a plan.
///
/// Field paths are either a metadata field (`className`, `teacher`, `date`,
/// `time`, `mainAim`, `subsidiaryAim`, `status`) or a stage field written as
/// `stages.<stageKey>.<field>` with field one of `activityDescription`,
/// `instructionsAndChecks`, `duration`, `interactionPattern`,
/// `anticipatedProblems`. Use [`ChangeCategory`] to change the category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetField {
    /// ID of the plan to edit
    pub id: u64,
    /// Field path, e.g. 'mainAim' or 'stages.warmUp.duration'
    pub field: String,
    /// New value; an empty value clears optional fields
    #[serde(default)]
    pub value: String,
}

/// Parameters for changing a plan's category.
///
/// Content of stages shared by both categories is kept; stages the new
/// category does not have are discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChangeCategory {
    /// ID of the plan to change
    pub id: u64,
    /// New lesson category
    pub category: String,
}

/// Parameters for commenting on a stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddComment {
    /// ID of the plan
    pub id: u64,
    /// Stage key the comment is about, e.g. 'clarification'
    pub stage: String,
    /// Display name of the author
    pub author: String,
    /// Author role: 'coordinator' or 'author'
    #[serde(default = "default_role")]
    pub role: String,
    /// Comment text
    pub message: String,
}

fn default_role() -> String {
    "author".to_string()
}

/// Parameters for reading one stage thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowThread {
    /// ID of the plan
    pub id: u64,
    /// Stage key whose comments to show
    pub stage: String,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// ID of the plan to delete
    pub id: u64,
    /// Must be true; deletion removes the plan, its stages and all comments
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for listing the stage catalog of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListStages {
    /// Lesson category
    pub category: String,
}
