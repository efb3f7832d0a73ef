//! Slopgraph - Provenance-Tracked Knowledge Graph Publisher

use clap::Parser;

use slopgraph::cli::App;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    // Log to stderr: stdout belongs to the MCP stdio transport.
    let filter = if app.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    app.run().await
}
