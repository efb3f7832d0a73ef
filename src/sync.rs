//! SPARQL endpoint client with bounded timeouts and typed failure
//! classification.
//!
//! Failures are split into timeout, HTTP status, and transport kinds so the
//! orchestrator (and ultimately the caller) can choose a distinct remediation
//! per kind instead of treating every failure the same way.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{GraphConfig, SyncConfig};
use crate::error::AppError;

/// The update-delivery capability the publish pipeline depends on.
///
/// [`SyncClient`] is the HTTP implementation; tests substitute capturing
/// sinks.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn update(&self, sparql: &str) -> Result<(), AppError>;
}

/// One row of SPARQL SELECT results: variable name → bound value.
pub type BindingRow = BTreeMap<String, String>;

/// HTTP client for the remote triple store.
///
/// Queries go to `{endpoint}/query`, updates to `{endpoint}/update`. The
/// connect timeout is short so a dead endpoint fails fast; the overall
/// timeout is longer so large updates can complete.
pub struct SyncClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SyncClient {
    pub fn new(graph: &GraphConfig, sync: &SyncConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(sync.connect_timeout_secs))
            .timeout(Duration::from_secs(sync.read_timeout_secs))
            .build()
            .map_err(|e| AppError::SyncTransport(format!("failed to build client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: graph.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Execute a SPARQL SELECT query, returning bindings as variable → value
    /// rows.
    pub async fn query(&self, sparql: &str) -> Result<Vec<BindingRow>, AppError> {
        let response = self
            .http
            .post(format!("{}/query", self.endpoint))
            .header("Content-Type", "application/sparql-query")
            .header("Accept", "application/sparql-results+json")
            .body(sparql.to_string())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SyncHttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let results: SparqlResults = response
            .json()
            .await
            .map_err(|e| AppError::SyncTransport(format!("malformed results: {}", e)))?;
        Ok(parse_bindings(results))
    }
}

#[async_trait]
impl GraphStore for SyncClient {
    /// Deliver a SPARQL update to the remote store.
    async fn update(&self, sparql: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/update", self.endpoint))
            .header("Content-Type", "application/sparql-update")
            .body(sparql.to_string())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SyncHttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Classify a transport-level failure into the error taxonomy.
fn classify(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::SyncTimeout(err.to_string())
    } else {
        AppError::SyncTransport(err.to_string())
    }
}

// ============================================================================
// SPARQL JSON results (application/sparql-results+json)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<BTreeMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

fn parse_bindings(results: SparqlResults) -> Vec<BindingRow> {
    results
        .results
        .bindings
        .into_iter()
        .map(|row| row.into_iter().map(|(var, v)| (var, v.value)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bindings() {
        let json = r#"{
            "head": {"vars": ["s", "p", "o"]},
            "results": {
                "bindings": [
                    {
                        "s": {"type": "uri", "value": "http://example.com/s"},
                        "p": {"type": "uri", "value": "http://example.com/p"},
                        "o": {"type": "literal", "value": "hello"}
                    }
                ]
            }
        }"#;
        let results: SparqlResults = serde_json::from_str(json).unwrap();
        let rows = parse_bindings(results);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["s"], "http://example.com/s");
        assert_eq!(rows[0]["o"], "hello");
    }

    #[test]
    fn test_parse_empty_bindings() {
        let json = r#"{"results": {"bindings": []}}"#;
        let results: SparqlResults = serde_json::from_str(json).unwrap();
        assert!(parse_bindings(results).is_empty());
    }
}
