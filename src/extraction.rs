//! NER engine seam and boundary validation.
//!
//! The extraction model itself is an external capability; the pipeline
//! depends only on the [`NerEngine`] trait. Raw engine output is untrusted:
//! it is validated here into typed [`EntityMention`] records before anything
//! downstream sees it.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::error::AppError;
use crate::models::{EntityLabel, EntityMention};
use crate::position::LineIndex;

/// Type schema sent with every extraction request.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSchema {
    /// Label name → prompt description.
    pub labels: BTreeMap<String, String>,
    /// Confidence threshold (0.0-1.0) below which the engine drops mentions.
    pub threshold: f64,
}

impl ExtractionSchema {
    /// The fixed know.dev schema covering every [`EntityLabel`].
    pub fn know_dev(threshold: f64) -> Self {
        let labels = EntityLabel::ALL
            .iter()
            .map(|label| (label.as_str().to_string(), label.description().to_string()))
            .collect();
        Self { labels, threshold }
    }
}

/// One mention as returned by a NER engine, untrusted until validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMention {
    pub text: String,
    pub label: String,
    pub start: i64,
    pub end: i64,
    pub confidence: f64,
}

/// Named-entity recognition engine.
///
/// Implementations wrap whatever model or service performs the extraction.
/// One call must be bounded in time so a stuck engine cannot stall
/// unrelated concurrent publishes.
#[async_trait]
pub trait NerEngine: Send + Sync {
    async fn extract(
        &self,
        text: &str,
        schema: &ExtractionSchema,
    ) -> Result<Vec<RawMention>, AppError>;
}

/// Validate raw engine output into typed mentions with resolved line spans.
///
/// Rejects unknown labels, inverted or negative character spans, and
/// confidence outside `[0, 1]`. Order of valid mentions is preserved.
pub fn validate_mentions(text: &str, raw: Vec<RawMention>) -> Result<Vec<EntityMention>, AppError> {
    let index = LineIndex::new(text);
    let mut mentions = Vec::with_capacity(raw.len());

    for m in raw {
        let label: EntityLabel = m
            .label
            .parse()
            .map_err(|e| AppError::Extraction(format!("engine returned {}", e)))?;

        if m.start < 0 || m.end < m.start {
            return Err(AppError::Extraction(format!(
                "mention '{}' has invalid span {}..{}",
                m.text, m.start, m.end
            )));
        }
        if !(0.0..=1.0).contains(&m.confidence) {
            return Err(AppError::Extraction(format!(
                "mention '{}' has confidence {} outside [0, 1]",
                m.text, m.confidence
            )));
        }

        mentions.push(EntityMention {
            line_start: Some(index.line_of(m.start)),
            line_end: Some(index.line_of(m.end)),
            text: m.text,
            label,
            char_start: m.start as usize,
            char_end: m.end as usize,
            confidence: m.confidence,
        });
    }

    Ok(mentions)
}

// ============================================================================
// HTTP engine
// ============================================================================

/// Request body sent to the extraction service.
#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
    schema: &'a ExtractionSchema,
}

/// Response body from the extraction service.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    entities: Vec<RawMention>,
}

/// NER engine backed by a remote HTTP extraction service.
///
/// Constructed once at startup and shared behind the context; there is no
/// lazily-initialized global model handle.
pub struct HttpNerEngine {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpNerEngine {
    pub fn new(config: &ExtractionConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Extraction(format!("failed to build client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl NerEngine for HttpNerEngine {
    async fn extract(
        &self,
        text: &str,
        schema: &ExtractionSchema,
    ) -> Result<Vec<RawMention>, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ExtractRequest { text, schema })
            .send()
            .await
            .map_err(|e| AppError::Extraction(format!("engine request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Extraction(format!(
                "engine returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| AppError::Extraction(format!("malformed engine response: {}", e)))?;
        Ok(body.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, label: &str, start: i64, end: i64, confidence: f64) -> RawMention {
        RawMention {
            text: text.to_string(),
            label: label.to_string(),
            start,
            end,
            confidence,
        }
    }

    #[test]
    fn test_schema_covers_all_labels() {
        let schema = ExtractionSchema::know_dev(0.5);
        assert_eq!(schema.labels.len(), EntityLabel::ALL.len());
        assert!(schema.labels.contains_key("Person"));
        assert!(schema.labels.contains_key("DefinedTerm"));
    }

    #[test]
    fn test_valid_mentions_resolve_lines() {
        let text = "Alice met Bob.\nThey talked.";
        let mentions = validate_mentions(
            text,
            vec![
                raw("Alice", "Person", 0, 5, 0.9),
                raw("They", "Topic", 15, 19, 0.6),
            ],
        )
        .unwrap();

        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].line_start, Some(1));
        assert_eq!(mentions[0].line_end, Some(1));
        assert_eq!(mentions[1].line_start, Some(2));
        assert_eq!(mentions[1].label, EntityLabel::Topic);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = validate_mentions("x", vec![raw("x", "Widget", 0, 1, 0.5)]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_inverted_span_rejected() {
        let err = validate_mentions("abc", vec![raw("a", "Person", 2, 1, 0.5)]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_negative_span_rejected() {
        let err = validate_mentions("abc", vec![raw("a", "Person", -1, 1, 0.5)]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let err = validate_mentions("abc", vec![raw("a", "Person", 0, 1, 1.5)]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_confidence_not_clamped() {
        let mentions = validate_mentions("abc", vec![raw("a", "Person", 0, 1, 0.73)]).unwrap();
        assert_eq!(mentions[0].confidence, 0.73);
    }

    #[test]
    fn test_order_preserved() {
        let mentions = validate_mentions(
            "Alice met Bob at Acme Corp.",
            vec![
                raw("Alice", "Person", 0, 5, 0.9),
                raw("Bob", "Person", 10, 13, 0.85),
                raw("Acme Corp", "Organization", 17, 26, 0.8),
            ],
        )
        .unwrap();
        let texts: Vec<_> = mentions.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Alice", "Bob", "Acme Corp"]);
    }
}
