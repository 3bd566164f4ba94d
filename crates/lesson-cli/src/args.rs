//! Command-line interface definitions using clap
//!
//! Every command has a clap-derived argument struct and a `From` conversion
//! into the matching core parameter type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Categories, statuses, roles and field paths are passed through as text so
//! that the CLI and the MCP server report identical errors for bad input.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use lesson_core::params::*;

/// Command-line editor for structured lesson plans
///
/// Plans belong to a lesson category (reading, listening, grammar, lexis or
/// mixed drill) which decides their ordered stages. Each stage holds the
/// activity, instructions and checks, timing, interaction pattern and
/// anticipated problems, and carries its own comment thread for review.
#[derive(Parser)]
#[command(version, about, name = "lp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/lessonplan/lessonplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage lesson plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show the stages of a lesson category
    #[command(alias = "st")]
    Stages(ListStagesArgs),
    /// Read and write stage comments
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Start the MCP server
    Serve,
}

/// Lesson categories accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Reading,
    Listening,
    Grammar,
    Lexis,
    MixedDrill,
}

impl std::fmt::Display for CategoryArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryArg::Reading => write!(f, "reading"),
            CategoryArg::Listening => write!(f, "listening"),
            CategoryArg::Grammar => write!(f, "grammar"),
            CategoryArg::Lexis => write!(f, "lexis"),
            CategoryArg::MixedDrill => write!(f, "mixed-drill"),
        }
    }
}

/// Review states accepted as a list filter
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    UnderReview,
    Approved,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusArg::Draft => write!(f, "draft"),
            StatusArg::UnderReview => write!(f, "under_review"),
            StatusArg::Approved => write!(f, "approved"),
        }
    }
}

/// Create a new lesson plan
///
/// The category decides which stages the plan has. Metadata given here can
/// also be filled in later with `plan set`.
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Lesson category
    pub category: CategoryArg,
    /// Class or group the lesson is for
    #[arg(short, long = "class")]
    pub class_name: Option<String>,
    /// Teacher delivering the lesson
    #[arg(short, long)]
    pub teacher: Option<String>,
    /// Lesson date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Lesson start time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,
    /// Main aim of the lesson
    #[arg(short, long)]
    pub main_aim: Option<String>,
    /// Subsidiary aim of the lesson
    #[arg(short, long)]
    pub subsidiary_aim: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            category: val.category.to_string(),
            class_name: val.class_name,
            teacher: val.teacher,
            date: val.date,
            time: val.time,
            main_aim: val.main_aim,
            subsidiary_aim: val.subsidiary_aim,
        }
    }
}

/// List lesson plans
///
/// Plans are listed most recently updated first, optionally filtered by
/// category, review status or teacher.
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans of this category
    #[arg(short, long)]
    pub category: Option<CategoryArg>,
    /// Only plans in this review state
    #[arg(short, long)]
    pub status: Option<StatusArg>,
    /// Only plans whose teacher contains this text (case-insensitive)
    #[arg(short, long)]
    pub teacher: Option<String>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            category: val.category.map(|c| c.to_string()),
            status: val.status.map(|s| s.to_string()),
            teacher: val.teacher,
        }
    }
}

/// Show a plan with all of its stages
#[derive(ClapArgs)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Set one field of a plan
///
/// Metadata fields are addressed by name (className, teacher, date, time,
/// mainAim, subsidiaryAim, status). Stage fields are addressed as
/// `stages.<stageKey>.<field>` where field is one of activityDescription,
/// instructionsAndChecks, duration, interactionPattern or
/// anticipatedProblems. An empty value clears optional fields.
#[derive(ClapArgs)]
pub struct SetFieldArgs {
    /// ID of the plan to edit
    pub id: u64,
    /// Field path, e.g. `teacher` or `stages.warmUp.duration`
    pub field: String,
    /// New value
    #[arg(default_value = "")]
    pub value: String,
}

impl From<SetFieldArgs> for SetField {
    fn from(val: SetFieldArgs) -> Self {
        SetField {
            id: val.id,
            field: val.field,
            value: val.value,
        }
    }
}

/// Change the category of a plan
///
/// Stages the old and new categories share keep their content, new stages
/// start empty and stages the new category lacks are discarded. Comment
/// threads are kept.
#[derive(ClapArgs)]
pub struct ChangeCategoryArgs {
    /// ID of the plan to change
    pub id: u64,
    /// New lesson category
    pub category: CategoryArg,
}

impl From<ChangeCategoryArgs> for ChangeCategory {
    fn from(val: ChangeCategoryArgs) -> Self {
        ChangeCategory {
            id: val.id,
            category: val.category.to_string(),
        }
    }
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new lesson plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List lesson plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with all of its stages
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Set one field of a plan
    #[command(alias = "e")]
    Set(SetFieldArgs),
    /// Change the category of a plan
    #[command(alias = "cat")]
    Category(ChangeCategoryArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

/// Show the ordered stages of a lesson category
#[derive(ClapArgs)]
pub struct ListStagesArgs {
    /// Lesson category
    pub category: CategoryArg,
}

impl From<ListStagesArgs> for ListStages {
    fn from(val: ListStagesArgs) -> Self {
        ListStages {
            category: val.category.to_string(),
        }
    }
}

/// Add a comment to a stage
#[derive(ClapArgs)]
pub struct AddCommentArgs {
    /// ID of the plan
    pub id: u64,
    /// Stage key, e.g. `clarification`
    pub stage: String,
    /// Comment text
    pub message: String,
    /// Name of the commenter
    #[arg(short, long)]
    pub author: String,
    /// Role of the commenter
    #[arg(short, long, value_enum, default_value_t = RoleArg::Author)]
    pub role: RoleArg,
}

impl From<AddCommentArgs> for AddComment {
    fn from(val: AddCommentArgs) -> Self {
        AddComment {
            id: val.id,
            stage: val.stage,
            author: val.author,
            role: val.role.to_string(),
            message: val.message,
        }
    }
}

/// Show the comment thread of a stage
#[derive(ClapArgs)]
pub struct ShowThreadArgs {
    /// ID of the plan
    pub id: u64,
    /// Stage key, e.g. `clarification`
    pub stage: String,
}

impl From<ShowThreadArgs> for ShowThread {
    fn from(val: ShowThreadArgs) -> Self {
        ShowThread {
            id: val.id,
            stage: val.stage,
        }
    }
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Add a comment to a stage
    #[command(alias = "a")]
    Add(AddCommentArgs),
    /// Show the comment thread of a stage
    #[command(aliases = ["l", "ls"])]
    List(ShowThreadArgs),
}

/// Commenter roles
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// The teacher who wrote the plan
    Author,
    /// A reviewer giving feedback
    Coordinator,
}

impl std::fmt::Display for RoleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleArg::Author => write!(f, "author"),
            RoleArg::Coordinator => write!(f, "coordinator"),
        }
    }
}
