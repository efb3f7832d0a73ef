//! Application context: shared dependency root.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::extraction::{HttpNerEngine, NerEngine};
use crate::services::PublishService;
use crate::sync::{GraphStore, SyncClient};

/// Root application context.
///
/// All shared collaborators are constructed once at startup and injected
/// here; tools and services borrow them by reference. The NER engine in
/// particular is built exactly once, replacing any lazily-initialized global
/// model handle.
#[derive(Clone)]
pub struct Context {
    pub config: Arc<Config>,
    pub ner: Arc<dyn NerEngine>,
    pub sync: Arc<SyncClient>,
}

impl Context {
    /// Build the context from loaded configuration.
    pub fn from(config: Config) -> Result<Self, AppError> {
        let ner = HttpNerEngine::new(&config.extraction)?;
        let sync = SyncClient::new(&config.graph, &config.sync)?;
        Ok(Self {
            config: Arc::new(config),
            ner: Arc::new(ner),
            sync: Arc::new(sync),
        })
    }

    /// Construct the publish service over this context's collaborators.
    pub fn publish_service(&self) -> PublishService {
        let store: Arc<dyn GraphStore> = self.sync.clone();
        PublishService::new(self.config.clone(), self.ner.clone(), store)
    }
}
