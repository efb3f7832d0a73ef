//! Model Context Protocol (MCP) server implementation for Slopgraph.
//!
//! Exposes the publish pipeline and the remote graph store to AI assistants.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router
//! - `tools`: Tool implementations organized by domain

pub(crate) mod server;
mod tools;

pub use server::McpServer;
