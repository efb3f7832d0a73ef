//! Publish tool - runs the staged pipeline for one slop.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::git::SlopRepo;
use crate::mcp::server::McpServer;
use crate::services::PublishInput;

/// Parameters for publish_slop tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PublishSlopParams {
    /// Title recorded in the slop frontmatter and provenance graph.
    pub title: String,
    /// Raw slop text to publish.
    pub content: String,
    /// Tags recorded as subject statements, in order.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[tool_router(router = publish_tools, vis = "pub(crate)")]
impl McpServer {
    /// Publish a slop through the staged pipeline.
    ///
    /// Stages: draft → local persist → commit+push → entity extraction →
    /// graph build → sync. Halts on the first failure; the report always
    /// lists completed stages and the artifacts already created. Completed
    /// stages are never rolled back.
    #[tool(
        description = "Publish a slop: persist it in the slop repository, commit and push, extract named entities, build the per-document provenance graph, and sync it to the remote store. Returns the staged report including any artifacts created before a failure."
    )]
    pub async fn publish_slop(
        &self,
        Parameters(params): Parameters<PublishSlopParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(title = %params.title, "Running publish_slop tool");

        let config = &self.ctx.config;
        let coordinates = config
            .repo
            .github_repo
            .clone()
            .ok_or_else(|| McpError::from(AppError::NotConfigured))?;
        let repo_path = config
            .repo_path()
            .ok_or_else(|| McpError::from(AppError::NotConfigured))?;

        let repo = SlopRepo::open(&repo_path, &coordinates).map_err(McpError::from)?;

        let report = self
            .ctx
            .publish_service()
            .publish(&repo, PublishInput {
                title: params.title,
                content: params.content,
                tags: params.tags,
            })
            .await;

        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            report,
        )?]))
    }
}
