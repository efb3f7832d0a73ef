//! Repository tools - setup and status.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::git::SlopRepo;
use crate::mcp::server::McpServer;

/// Parameters for setup_slop_repo tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetupSlopRepoParams {
    /// GitHub repository in `org/name` form, or a full URL.
    pub github_repo: String,
}

/// Result of repository setup.
#[derive(Debug, Serialize)]
pub struct SetupSlopRepoResult {
    pub coordinates: String,
    pub path: String,
    /// Config snippet to persist the coordinates across restarts.
    pub config_snippet: String,
}

/// Current configuration status.
#[derive(Debug, Serialize)]
pub struct SlopStatusResult {
    pub repo_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<String>,
    pub repo_cloned: bool,
    pub endpoint: String,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[tool_router(router = repo_tools, vis = "pub(crate)")]
impl McpServer {
    /// Clone a slop repository into the local data directory.
    ///
    /// Configuration is immutable at runtime, so the response carries the
    /// snippet to add to `~/.config/slopgraph/config.toml` (or the
    /// `SLOPGRAPH_REPO__GITHUB_REPO` variable to export) so publishes find
    /// the clone.
    #[tool(
        description = "Clone a GitHub slop repository (org/name) into the local data directory and return the config snippet that records it."
    )]
    pub async fn setup_slop_repo(
        &self,
        Parameters(params): Parameters<SetupSlopRepoParams>,
    ) -> Result<CallToolResult, McpError> {
        let coordinates = SlopRepo::normalize_coordinates(&params.github_repo);
        tracing::info!(repo = %coordinates, "Running setup_slop_repo tool");

        let dest = Config::data_dir().join(&coordinates);
        SlopRepo::clone_repo(&coordinates, &dest).map_err(McpError::from)?;

        let response = SetupSlopRepoResult {
            config_snippet: format!("[repo]\ngithub_repo = \"{}\"\n", coordinates),
            path: dest.display().to_string(),
            coordinates,
        };
        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            response,
        )?]))
    }

    /// Report the current repository and endpoint configuration.
    #[tool(description = "Show slop repository and graph endpoint configuration status.")]
    pub async fn slop_status(&self) -> Result<CallToolResult, McpError> {
        let config = &self.ctx.config;
        let repo_path = config.repo_path();

        let response = SlopStatusResult {
            repo_configured: config.repo.github_repo.is_some(),
            github_repo: config.repo.github_repo.clone(),
            repo_cloned: repo_path.as_ref().is_some_and(|p| p.exists()),
            repo_path: repo_path.map(|p| p.display().to_string()),
            endpoint: config.graph.endpoint.clone(),
            base: config.graph.base.clone(),
            author: config.author_name(),
        };
        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            response,
        )?]))
    }
}
