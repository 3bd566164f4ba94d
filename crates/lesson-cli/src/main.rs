//! Lesson plan CLI application
//!
//! Command-line editor and MCP server for structured lesson plans.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use lesson_core::{params::ListPlans, PlannerBuilder};
use log::info;
use mcp::{run_stdio_server, LessonPlanMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_optional_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Lesson planner started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Stages(args)) => Cli::new(planner, renderer).list_stages(args),
        Some(Comment { command }) => {
            Cli::new(planner, renderer)
                .handle_comment_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting lesson plan MCP server");
            run_stdio_server(LessonPlanMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
