//! MCP tool implementations organized by domain.

pub mod graph;
pub mod publish;
pub mod repo;
