//! Slopgraph - Provenance-Tracked Knowledge Graph Publisher
//!
//! Publishes short text documents ("slops") into a shared knowledge graph:
//! each slop is committed to a git repository, scanned for named entities,
//! compiled into RDF statements scoped to a per-document named graph, and
//! synchronized to a remote SPARQL endpoint.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod extraction;
pub mod git;
pub mod graph;
pub mod identity;
pub mod mcp;
pub mod models;
pub mod position;
pub mod services;
pub mod sync;
