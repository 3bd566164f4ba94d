//! MCP tool handlers implementation

use std::sync::Arc;

use lesson_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    params as core, Planner,
};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// `#[serde(transparent)]` passes deserialization straight through to the
/// wrapped core type, and the schema is the core type's schema, so the core
/// crate stays free of MCP-specific types.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type SetField = McpParams<core::SetField>;
pub type ChangeCategory = McpParams<core::ChangeCategory>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type ListStages = McpParams<core::ListStages>;
pub type AddComment = McpParams<core::AddComment>;
pub type ShowThread = McpParams<core::ShowThread>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text_result(CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let summaries = self
            .planner
            .lock()
            .await
            .list_plans_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            return text_result(summaries.to_string());
        }
        text_result(format!("# Lesson Plans\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let id = params.as_ref().id;
        let plan = self
            .planner
            .lock()
            .await
            .show_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(format!("Plan with ID {id} not found"), None)
            })?;

        text_result(plan.to_string())
    }

    pub async fn set_field(&self, Parameters(params): Parameters<SetField>) -> McpResult {
        debug!("set_field: {:?}", params);

        let inner = params.as_ref();
        let plan = self
            .planner
            .lock()
            .await
            .set_field(inner)
            .await
            .map_err(|e| to_mcp_error(&format!("Failed to set {}", inner.field), &e))?;

        let change = if inner.value.is_empty() {
            format!("Cleared {}", inner.field)
        } else {
            format!("Set {} to {}", inner.field, inner.value)
        };
        text_result(UpdateResult::with_changes(plan, vec![change]).to_string())
    }

    pub async fn change_category(
        &self,
        Parameters(params): Parameters<ChangeCategory>,
    ) -> McpResult {
        debug!("change_category: {:?}", params);

        let change = self
            .planner
            .lock()
            .await
            .change_category(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change category", &e))?;

        text_result(change.to_string())
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {:?}", params);

        let id = params.as_ref().id;
        let deleted = self
            .planner
            .lock()
            .await
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(format!("Plan with ID {id} not found"), None)
            })?;

        let result = OperationStatus::success(format!(
            "Permanently deleted plan '{}' (ID: {id}) and its comments. This action cannot be undone.",
            deleted.title()
        ));
        text_result(result.to_string())
    }

    pub async fn list_stages(&self, Parameters(params): Parameters<ListStages>) -> McpResult {
        debug!("list_stages: {:?}", params);

        let listing = self
            .planner
            .lock()
            .await
            .list_stages(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to list stages", &e))?;

        text_result(listing.to_string())
    }

    pub async fn add_comment(&self, Parameters(params): Parameters<AddComment>) -> McpResult {
        debug!("add_comment: {:?}", params);

        let comment = self
            .planner
            .lock()
            .await
            .add_comment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add comment", &e))?;

        text_result(CreateResult::new(comment).to_string())
    }

    pub async fn show_thread(&self, Parameters(params): Parameters<ShowThread>) -> McpResult {
        debug!("show_thread: {:?}", params);

        let thread = self
            .planner
            .lock()
            .await
            .show_thread(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load comments", &e))?;

        text_result(thread.to_string())
    }
}
