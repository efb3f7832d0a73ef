//! Application error types with MCP protocol conversion.
//!
//! Every publish stage converts its underlying failure into one of these
//! variants; no raw failure crosses a stage boundary uncaught. Sync failures
//! are split into three distinguishable kinds so callers can pick a distinct
//! remediation (narrow the query, check connectivity, inspect server logs).

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Application-level errors for Slopgraph.
#[derive(Error, Debug)]
pub enum AppError {
    // Local persist errors
    #[error("Local write failed: {0}")]
    LocalIo(#[from] std::io::Error),

    // Version control errors
    #[error("Version control failed: {message}")]
    VersionControl { message: String },

    #[error("Repository not found at: {0}")]
    RepoNotFound(String),

    // Extraction errors
    #[error("Entity extraction failed: {0}")]
    Extraction(String),

    // Graph build errors
    #[error("Graph build failed: {0}")]
    GraphBuild(String),

    // Sync errors, classified by failure kind
    #[error("Sync timed out: {0}")]
    SyncTimeout(String),

    #[error("Sync rejected with HTTP {status}: {body}")]
    SyncHttpStatus { status: u16, body: String },

    #[error("Sync transport failure: {0}")]
    SyncTransport(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("No slop repository configured. Run setup_slop_repo first.")]
    NotConfigured,
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let (code, app_code) = match &err {
            AppError::LocalIo(_) => (ErrorCode::INTERNAL_ERROR, "LOCAL_IO_ERROR"),
            AppError::VersionControl { .. } => (ErrorCode::INTERNAL_ERROR, "VERSION_CONTROL_ERROR"),
            AppError::RepoNotFound(_) => (ErrorCode::RESOURCE_NOT_FOUND, "REPO_NOT_FOUND"),
            AppError::Extraction(_) => (ErrorCode::INTERNAL_ERROR, "EXTRACTION_ERROR"),
            AppError::GraphBuild(_) => (ErrorCode::INVALID_PARAMS, "GRAPH_BUILD_ERROR"),
            AppError::SyncTimeout(_) => (ErrorCode::INTERNAL_ERROR, "SYNC_TIMEOUT"),
            AppError::SyncHttpStatus { .. } => (ErrorCode::INTERNAL_ERROR, "SYNC_HTTP_STATUS"),
            AppError::SyncTransport(_) => (ErrorCode::INTERNAL_ERROR, "SYNC_TRANSPORT"),
            AppError::Config(_) => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
            AppError::NotConfigured => (ErrorCode::INVALID_REQUEST, "NOT_CONFIGURED"),
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", app_code, err), None)
    }
}
