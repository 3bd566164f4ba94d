//! MCP server for lesson plans
//!
//! Exposes plan editing, the stage catalog and stage comment threads as
//! Model Context Protocol tools over stdio.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use lesson_core::Planner;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddComment, ChangeCategory, CreatePlan, DeletePlan, Id, ListPlans, ListStages, McpResult,
    SetField, ShowThread,
};

/// MCP server for lesson plans
#[derive(Clone)]
pub struct LessonPlanMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LessonPlanMcpServer {
    /// Create a new lesson plan MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new lesson plan. The category (reading, listening, grammar, lexis or mixed-drill) is required and decides the ordered stages. Optionally set class_name, teacher, date (YYYY-MM-DD), time (HH:MM), main_aim and subsidiary_aim. Returns the new plan with its ID."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List lesson plans, most recently updated first. Optionally filter by category, status (draft, under_review, approved) or a case-insensitive part of the teacher's name. Each entry shows how many stages are planned and how many comments the plan has."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a complete lesson plan: metadata, review status and every stage in teaching order with its activity, timing, interaction pattern, instructions and checks, and anticipated problems."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "set_field",
        description = "Set one field of a plan and save it. Metadata fields: className, teacher, date, time, mainAim, subsidiaryAim, status. Stage fields use the path stages.<stageKey>.<field> with field one of activityDescription, instructionsAndChecks, duration (minutes), interactionPattern, anticipatedProblems. An empty value clears optional fields. Status moves draft -> under_review -> approved, and under_review can return to draft. Use change_category to change the category."
    )]
    async fn set_field(&self, params: Parameters<SetField>) -> McpResult {
        self.handlers().set_field(params).await
    }

    #[tool(
        name = "change_category",
        description = "Change the category of a plan. Stages shared by the old and new category keep their content, new stages start empty and stages the new category lacks are discarded. Comment threads are kept. Returns which stages were kept, added and discarded."
    )]
    async fn change_category(&self, params: Parameters<ChangeCategory>) -> McpResult {
        self.handlers().change_category(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan together with its stages and comment threads. Requires confirmed=true. This operation cannot be undone."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "list_stages",
        description = "List the stages of a lesson category in teaching order with their keys. Use the keys in set_field paths and comment tools."
    )]
    async fn list_stages(&self, params: Parameters<ListStages>) -> McpResult {
        self.handlers().list_stages(params).await
    }

    #[tool(
        name = "add_comment",
        description = "Append a comment to the thread of one stage of a plan. Provide the plan id, stage key, author name, role (author or coordinator, default author) and a non-empty message. The stage must belong to the plan's current category."
    )]
    async fn add_comment(&self, params: Parameters<AddComment>) -> McpResult {
        self.handlers().add_comment(params).await
    }

    #[tool(
        name = "show_thread",
        description = "Show the comment thread of one stage of a plan, oldest comment first."
    )]
    async fn show_thread(&self, params: Parameters<ShowThread>) -> McpResult {
        self.handlers().show_thread(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LessonPlanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "lessonplan".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Lesson plans organise a class into ordered stages decided by the lesson category.

## Core Concepts
- **Plans**: class, teacher, date and time, main and subsidiary aims, and a review status (draft, under_review, approved)
- **Stages**: fixed per category; each has an activity description, instructions and checks, duration, interaction pattern and anticipated problems
- **Comments**: every stage has its own thread; authors and coordinators discuss the plan there

## Workflow
1. Look up the stages of a category with `list_stages`
2. Create a plan with `create_plan`
3. Fill stages one field at a time with `set_field`
4. Submit for review by setting `status` to `under_review`; coordinators comment with `add_comment`
5. Approve or send back to draft with `set_field`

Switching category with `change_category` keeps the content of shared stages and discards the rest."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: LessonPlanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting lesson plan MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use lesson_core::PlannerBuilder;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_every_tool() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let planner = PlannerBuilder::new()
            .with_database_path(temp_dir.path().join("mcp.db"))
            .build()
            .await
            .expect("Failed to create planner");
        let server = LessonPlanMcpServer::new(planner);

        let mut names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            [
                "add_comment",
                "change_category",
                "create_plan",
                "delete_plan",
                "list_plans",
                "list_stages",
                "set_field",
                "show_plan",
                "show_thread",
            ]
        );

        let info = server.get_info();
        assert_eq!(info.server_info.name, "lessonplan");
        assert!(info.capabilities.tools.is_some());
    }
}
