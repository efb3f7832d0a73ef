//! Graph tools - SPARQL query and update passthrough.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::{Deserialize, Serialize};

use crate::mcp::server::McpServer;
use crate::sync::{BindingRow, GraphStore};

/// Parameters for query_graph tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryGraphParams {
    /// SPARQL SELECT query.
    pub sparql: String,
}

/// Parameters for update_graph tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateGraphParams {
    /// SPARQL update (INSERT DATA / DELETE DATA).
    pub sparql: String,
}

/// Result of a SELECT query.
#[derive(Debug, Serialize)]
pub struct QueryGraphResult {
    pub rows: Vec<BindingRow>,
    pub row_count: usize,
}

#[tool_router(router = graph_tools, vis = "pub(crate)")]
impl McpServer {
    /// Execute a SPARQL SELECT query against the remote store.
    #[tool(
        description = "Execute a SPARQL SELECT query against the triple store. Returns result rows as variable-to-value bindings."
    )]
    pub async fn query_graph(
        &self,
        Parameters(params): Parameters<QueryGraphParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("Running query_graph tool");

        let rows = self
            .ctx
            .sync
            .query(&params.sparql)
            .await
            .map_err(McpError::from)?;

        let response = QueryGraphResult {
            row_count: rows.len(),
            rows,
        };
        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            response,
        )?]))
    }

    /// Execute a raw SPARQL update against the remote store.
    #[tool(
        description = "Execute a SPARQL UPDATE (INSERT/DELETE) operation against the triple store. Useful to re-issue a sync that failed after a successful commit."
    )]
    pub async fn update_graph(
        &self,
        Parameters(params): Parameters<UpdateGraphParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("Running update_graph tool");

        self.ctx
            .sync
            .update(&params.sparql)
            .await
            .map_err(McpError::from)?;

        Ok(CallToolResult::success(vec![rmcp::model::Content::text(
            "Update successful.",
        )]))
    }
}
