//! CLI module for Slopgraph.
//!
//! Subcommands:
//! - `mcp`: Run the MCP server (stdio transport)
//! - `publish`: Publish a slop from a file
//! - `query`: Run a SPARQL SELECT query against the endpoint

mod mcp;
mod publish;
mod query;

use clap::{Parser, Subcommand};

/// Slopgraph - Provenance-Tracked Knowledge Graph Publisher
#[derive(Parser)]
#[command(name = "slopgraph")]
#[command(about = "Provenance-tracked knowledge graph publisher - MCP server for slops")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the MCP server (stdio transport for local use)
    Mcp,

    /// Publish a slop from a file
    Publish {
        /// Path to the text file to publish
        file: std::path::PathBuf,

        /// Slop title (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,

        /// Tags, repeatable
        #[arg(long)]
        tag: Vec<String>,
    },

    /// Run a SPARQL SELECT query against the configured endpoint
    Query {
        /// The SPARQL query text
        sparql: String,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Mcp => self.run_mcp().await,
            Command::Publish {
                ref file,
                ref title,
                ref tag,
            } => self.run_publish(file, title.clone(), tag.clone()).await,
            Command::Query { ref sparql } => self.run_query(sparql).await,
        }
    }
}
