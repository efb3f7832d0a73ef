//! Query command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;

use super::App;

impl App {
    /// Run a SPARQL SELECT query and print the binding rows as JSON.
    pub async fn run_query(&self, sparql: &str) -> Result<()> {
        let config = Config::load()?;
        let ctx = Context::from(config)?;

        let rows = ctx.sync.query(sparql).await?;
        println!("{}", serde_json::to_string_pretty(&rows)?);

        Ok(())
    }
}
