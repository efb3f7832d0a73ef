//! Staged publish pipeline.
//!
//! Stages run strictly sequentially with no backward transitions:
//! Drafted → Persisted → VersionControlled → Extracted → GraphBuilt → Synced.
//! The pipeline halts on the first failure and reports every artifact
//! already obtained from completed stages. Nothing is rolled back: a
//! completed persist or commit stays in place even when a later stage fails,
//! and retrying means re-invoking the whole pipeline (which mints a new
//! commit, hence a new document identity).

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::extraction::{validate_mentions, ExtractionSchema, NerEngine};
use crate::git::VersionControl;
use crate::graph::builder::{DocumentFacts, GraphBuilder};
use crate::graph::sparql;
use crate::identity;
use crate::models::Slop;
use crate::sync::GraphStore;

/// Publish pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Drafted,
    Persisted,
    VersionControlled,
    Extracted,
    GraphBuilt,
    Synced,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Drafted => "drafted",
            Stage::Persisted => "persisted",
            Stage::VersionControlled => "version_controlled",
            Stage::Extracted => "extracted",
            Stage::GraphBuilt => "graph_built",
            Stage::Synced => "synced",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one publish request.
#[derive(Debug, Clone)]
pub struct PublishInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Outcome of one publish request.
///
/// Always states which stages completed, which stage failed (if any), and
/// the artifacts already created, so the caller can decide whether to retry,
/// manually complete a stage, or abandon.
#[derive(Debug, Serialize)]
pub struct PublishReport {
    pub slop_id: Uuid,
    /// Stages completed, in order.
    pub completed: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    // Artifacts from completed stages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_count: Option<usize>,
}

impl PublishReport {
    fn new(slop_id: Uuid) -> Self {
        Self {
            slop_id,
            completed: Vec::new(),
            failed_stage: None,
            error: None,
            local_path: None,
            commit_hash: None,
            document_uri: None,
            graph_uri: None,
            entity_count: None,
            statement_count: None,
        }
    }

    fn complete(&mut self, stage: Stage) {
        tracing::info!(stage = %stage, "publish stage complete");
        self.completed.push(stage);
    }

    fn fail(mut self, stage: Stage, err: AppError) -> Self {
        tracing::error!(stage = %stage, error = %err, "publish halted");
        self.failed_stage = Some(stage);
        self.error = Some(err.to_string());
        self
    }

    /// True when every stage through Synced completed.
    pub fn succeeded(&self) -> bool {
        self.failed_stage.is_none() && self.completed.last() == Some(&Stage::Synced)
    }
}

/// Drives one publish through the staged pipeline.
///
/// Holds its collaborators by shared reference; nothing here retries
/// automatically, and cancellation between stages leaves completed stages
/// untouched.
pub struct PublishService {
    config: Arc<Config>,
    ner: Arc<dyn NerEngine>,
    store: Arc<dyn GraphStore>,
}

impl PublishService {
    pub fn new(config: Arc<Config>, ner: Arc<dyn NerEngine>, store: Arc<dyn GraphStore>) -> Self {
        Self { config, ner, store }
    }

    /// Run the full pipeline for one slop. Never returns an error: failures
    /// are encoded in the report.
    pub async fn publish(&self, repo: &dyn VersionControl, input: PublishInput) -> PublishReport {
        let slop = Slop::draft(
            input.title,
            self.config.author_name(),
            input.tags,
            input.content,
        );
        let mut report = PublishReport::new(slop.id);
        report.complete(Stage::Drafted);

        // Persist locally
        let rel_path = slop.file_path();
        match repo.persist(&rel_path, &slop.to_markdown()) {
            Ok(path) => report.local_path = Some(path.display().to_string()),
            Err(e) => return report.fail(Stage::Persisted, e),
        }
        report.complete(Stage::Persisted);

        // Commit and push
        let slop_id = slop.id.to_string();
        let message = format!("slop: {}", slop.title.as_deref().unwrap_or(&slop_id));
        let commit_hash = match repo.commit_and_push(&rel_path, &message) {
            Ok(hash) => hash,
            Err(e) => return report.fail(Stage::VersionControlled, e),
        };
        let document_uri = identity::document_uri(repo.coordinates(), &rel_path, &commit_hash);
        report.commit_hash = Some(commit_hash);
        report.document_uri = Some(document_uri.clone());
        report.complete(Stage::VersionControlled);

        // Extract entities
        let schema = ExtractionSchema::know_dev(self.config.extraction.threshold);
        let raw = match self.ner.extract(&slop.content, &schema).await {
            Ok(raw) => raw,
            Err(e) => return report.fail(Stage::Extracted, e),
        };
        let mentions = match validate_mentions(&slop.content, raw) {
            Ok(mentions) => mentions,
            Err(e) => return report.fail(Stage::Extracted, e),
        };
        report.entity_count = Some(mentions.len());
        report.complete(Stage::Extracted);

        // Build the named graph
        let base = &self.config.graph.base;
        let author = self
            .config
            .author_username()
            .unwrap_or_else(|| "anonymous".to_string());
        let repo_name = repo
            .coordinates()
            .rsplit('/')
            .next()
            .unwrap_or("slops")
            .to_string();
        let graph_uri = identity::graph_uri(base, &author, &repo_name, &slop_id);
        let file_name = slop.file_name();
        let facts = DocumentFacts {
            document_uri: &document_uri,
            graph_uri: &graph_uri,
            file_name: &file_name,
        };
        let quads = match GraphBuilder::new(base).build(&facts, &slop, &mentions) {
            Ok(quads) => quads,
            Err(e) => return report.fail(Stage::GraphBuilt, e),
        };
        let payload = sparql::insert_data(&quads);
        report.graph_uri = Some(graph_uri);
        report.statement_count = Some(quads.len());
        report.complete(Stage::GraphBuilt);

        // Sync to the remote store
        if let Err(e) = self.store.update(&payload).await {
            return report.fail(Stage::Synced, e);
        }
        report.complete(Stage::Synced);

        report
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::extraction::RawMention;

    struct FakeRepo {
        fail_commit: bool,
        persisted: Mutex<Vec<String>>,
    }

    impl FakeRepo {
        fn new(fail_commit: bool) -> Self {
            Self {
                fail_commit,
                persisted: Mutex::new(Vec::new()),
            }
        }
    }

    impl VersionControl for FakeRepo {
        fn coordinates(&self) -> &str {
            "alice/slops"
        }

        fn persist(&self, rel_path: &str, _contents: &str) -> Result<PathBuf, AppError> {
            self.persisted.lock().unwrap().push(rel_path.to_string());
            Ok(PathBuf::from("/tmp").join(rel_path))
        }

        fn commit_and_push(&self, _rel_path: &str, _message: &str) -> Result<String, AppError> {
            if self.fail_commit {
                Err(AppError::VersionControl {
                    message: "push rejected".to_string(),
                })
            } else {
                Ok("deadbeefcafe".to_string())
            }
        }
    }

    struct FakeEngine {
        calls: AtomicUsize,
        mentions: Vec<RawMention>,
    }

    impl FakeEngine {
        fn new(mentions: Vec<RawMention>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                mentions,
            }
        }
    }

    #[async_trait]
    impl NerEngine for FakeEngine {
        async fn extract(
            &self,
            _text: &str,
            _schema: &ExtractionSchema,
        ) -> Result<Vec<RawMention>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.mentions.clone())
        }
    }

    #[derive(Default)]
    struct CapturingStore {
        payloads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GraphStore for CapturingStore {
        async fn update(&self, sparql: &str) -> Result<(), AppError> {
            self.payloads.lock().unwrap().push(sparql.to_string());
            Ok(())
        }
    }

    fn sample_mentions() -> Vec<RawMention> {
        vec![
            RawMention {
                text: "Alice".to_string(),
                label: "Person".to_string(),
                start: 0,
                end: 5,
                confidence: 0.9,
            },
            RawMention {
                text: "Bob".to_string(),
                label: "Person".to_string(),
                start: 10,
                end: 13,
                confidence: 0.85,
            },
            RawMention {
                text: "Acme Corp".to_string(),
                label: "Organization".to_string(),
                start: 17,
                end: 26,
                confidence: 0.8,
            },
        ]
    }

    fn service(engine: Arc<FakeEngine>, store: Arc<CapturingStore>) -> PublishService {
        PublishService::new(Arc::new(Config::default()), engine, store)
    }

    fn input() -> PublishInput {
        PublishInput {
            title: "Standup".to_string(),
            content: "Alice met Bob at Acme Corp.".to_string(),
            tags: vec!["work".to_string()],
        }
    }

    #[tokio::test]
    async fn test_successful_publish_reports_all_stages() {
        let engine = Arc::new(FakeEngine::new(sample_mentions()));
        let store = Arc::new(CapturingStore::default());
        let repo = FakeRepo::new(false);

        let report = service(engine.clone(), store.clone())
            .publish(&repo, input())
            .await;

        assert!(report.succeeded());
        assert_eq!(
            report.completed,
            vec![
                Stage::Drafted,
                Stage::Persisted,
                Stage::VersionControlled,
                Stage::Extracted,
                Stage::GraphBuilt,
                Stage::Synced,
            ]
        );
        assert_eq!(report.commit_hash.as_deref(), Some("deadbeefcafe"));
        assert_eq!(report.entity_count, Some(3));
        assert!(report
            .document_uri
            .as_deref()
            .unwrap()
            .contains("blob/deadbeefcafe/slops/"));
        assert!(report
            .graph_uri
            .as_deref()
            .unwrap()
            .contains("/graph/"));

        let payloads = store.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].starts_with("INSERT DATA"));
        assert!(payloads[0].contains("GRAPH <"));
    }

    #[tokio::test]
    async fn test_commit_failure_halts_before_extraction() {
        let engine = Arc::new(FakeEngine::new(sample_mentions()));
        let store = Arc::new(CapturingStore::default());
        let repo = FakeRepo::new(true);

        let report = service(engine.clone(), store.clone())
            .publish(&repo, input())
            .await;

        assert!(!report.succeeded());
        assert_eq!(report.failed_stage, Some(Stage::VersionControlled));
        assert_eq!(report.completed, vec![Stage::Drafted, Stage::Persisted]);
        // Zero external calls beyond the failed stage
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        assert!(store.payloads.lock().unwrap().is_empty());
        // Artifacts from completed stages are still reported
        assert!(report.local_path.is_some());
        assert!(report.commit_hash.is_none());
    }

    #[tokio::test]
    async fn test_invalid_engine_output_fails_extraction_stage() {
        let engine = Arc::new(FakeEngine::new(vec![RawMention {
            text: "x".to_string(),
            label: "Widget".to_string(),
            start: 0,
            end: 1,
            confidence: 0.5,
        }]));
        let store = Arc::new(CapturingStore::default());
        let repo = FakeRepo::new(false);

        let report = service(engine, store.clone()).publish(&repo, input()).await;

        assert_eq!(report.failed_stage, Some(Stage::Extracted));
        // Commit already happened and is not undone
        assert!(report.commit_hash.is_some());
        assert!(store.payloads.lock().unwrap().is_empty());
    }
}
