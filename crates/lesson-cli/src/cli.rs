//! Command handlers for the terminal interface.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! planner and renders the matching display wrapper.

use anyhow::{bail, Context, Result};
use lesson_core::{
    display::{CreateResult, DeleteResult, UpdateResult},
    params::{ListPlans, SetField},
    Planner,
};
use log::debug;

use crate::{
    args::{CommentCommands, ListStagesArgs, PlanCommands},
    renderer::TerminalRenderer,
};

/// Runs one CLI command against a planner.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let id = args.id;
                match self
                    .planner
                    .show_plan(&args.into())
                    .await
                    .context("Failed to load plan")?
                {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => bail!("Plan with ID {id} not found"),
                }
            }
            PlanCommands::Set(args) => self.set_field(args.into()).await,
            PlanCommands::Category(args) => {
                let change = self
                    .planner
                    .change_category(&args.into())
                    .await
                    .context("Failed to change category")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Delete(args) => {
                let id = args.id;
                let deleted = self
                    .planner
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                match deleted {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => bail!("Plan with ID {id} not found"),
                }
            }
        }
    }

    pub async fn handle_comment_command(&self, command: CommentCommands) -> Result<()> {
        match command {
            CommentCommands::Add(args) => {
                let comment = self
                    .planner
                    .add_comment(&args.into())
                    .await
                    .context("Failed to add comment")?;
                self.renderer.render(&CreateResult::new(comment).to_string())
            }
            CommentCommands::List(args) => {
                let thread = self
                    .planner
                    .show_thread(&args.into())
                    .await
                    .context("Failed to load comments")?;
                self.renderer.render(&thread.to_string())
            }
        }
    }

    pub fn list_stages(&self, args: ListStagesArgs) -> Result<()> {
        let listing = self
            .planner
            .list_stages(&args.into())
            .context("Failed to list stages")?;
        self.renderer.render(&listing.to_string())
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_summary(params)
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&summaries.to_string())
    }

    async fn set_field(&self, params: SetField) -> Result<()> {
        debug!("set {} on plan {}", params.field, params.id);

        let plan = self
            .planner
            .set_field(&params)
            .await
            .with_context(|| format!("Failed to set {}", params.field))?;

        let change = if params.value.is_empty() {
            format!("Cleared {}", params.field)
        } else {
            format!("Set {} to {}", params.field, params.value)
        };
        self.renderer
            .render(&UpdateResult::with_changes(plan, vec![change]).to_string())
    }
}
