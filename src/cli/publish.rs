//! Publish command handler.

use std::path::Path;

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::error::AppError;
use crate::git::SlopRepo;
use crate::services::PublishInput;

use super::App;

impl App {
    /// Publish a slop from a local file through the staged pipeline.
    pub async fn run_publish(
        &self,
        file: &Path,
        title: Option<String>,
        tags: Vec<String>,
    ) -> Result<()> {
        let config = Config::load()?;

        let coordinates = config
            .repo
            .github_repo
            .clone()
            .ok_or(AppError::NotConfigured)?;
        let repo_path = config.repo_path().ok_or(AppError::NotConfigured)?;

        let content = std::fs::read_to_string(file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read {}: {}", file.display(), e))?;
        let title = title.unwrap_or_else(|| {
            file.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "untitled".to_string())
        });

        let ctx = Context::from(config)?;
        let repo = SlopRepo::open(&repo_path, &coordinates)?;

        let report = ctx
            .publish_service()
            .publish(
                &repo,
                PublishInput {
                    title,
                    content,
                    tags,
                },
            )
            .await;

        println!("{}", serde_json::to_string_pretty(&report)?);

        if report.succeeded() {
            Ok(())
        } else {
            Err(color_eyre::eyre::eyre!(
                "publish halted at stage {}",
                report
                    .failed_stage
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ))
        }
    }
}
