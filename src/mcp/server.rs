//! MCP server implementation for Slopgraph.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::context::Context;

/// Slopgraph MCP server.
///
/// This server provides AI assistants with tools to:
/// - Publish slops through the staged pipeline
/// - Query and update the remote triple store
/// - Set up and inspect the local slop repository
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new Slopgraph MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!("Initializing Slopgraph MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    /// Build the combined tool router from all tool modules.
    fn tool_router() -> ToolRouter<Self> {
        Self::publish_tools() + Self::graph_tools() + Self::repo_tools()
    }

    /// Get direct access to the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"Slopgraph - Provenance-Tracked Knowledge Graph Publisher

Publishes short text documents ("slops") into a shared knowledge graph.
Each publish commits the slop to a git repository, extracts named entities,
compiles them into RDF statements scoped to a per-document named graph, and
syncs the graph to a remote SPARQL endpoint.

## Getting Started

1. **setup_slop_repo** - Clone your slop repository (run once)
2. **slop_status** - Check repository and endpoint configuration
3. **publish_slop** - Publish a slop through the staged pipeline

## Publishing

publish_slop runs six sequential stages: draft, local persist, commit+push,
entity extraction, graph build, and sync. The pipeline halts on the first
failure and the report always lists which stages completed and which
artifacts (file path, commit hash, document URL, graph URI) already exist.
Nothing is rolled back; retrying re-runs the whole pipeline and mints a new
document identity.

## Graph Tools

- **query_graph** - Run a SPARQL SELECT query, rows returned as
  variable-to-value bindings
- **update_graph** - Run a raw SPARQL update (e.g. to re-issue a sync that
  failed after a successful commit)
"#
                .to_string(),
            ),
        }
    }
}
