#![cfg(feature = "mock")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{
    errors::{Error, Result},
    types::ModelDescriptor,
    validate::ModelClient,
};

/// In-memory mock configuration for offline tests.
///
/// Queued results are consumed in order, one per `list_models` call; an
/// exhausted queue yields an error so tests fail loudly on extra calls.
#[derive(Default)]
pub struct MockConfig {
    pub list_results: Vec<Result<Vec<ModelDescriptor>>>,
}

impl MockConfig {
    pub fn with_models(mut self, models: Vec<ModelDescriptor>) -> Self {
        self.list_results.push(Ok(models));
        self
    }

    pub fn with_error(mut self, err: Error) -> Self {
        self.list_results.push(Err(err));
        self
    }
}

/// Offline [`ModelClient`] backed by a queue of canned results.
#[derive(Clone)]
pub struct MockModelClient {
    inner: Arc<Mutex<VecDeque<Result<Vec<ModelDescriptor>>>>>,
}

impl MockModelClient {
    pub fn new(cfg: MockConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::from(cfg.list_results))),
        }
    }
}

impl ModelClient for MockModelClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(Error::Config("no mock list result queued".into())))
    }
}

pub mod fixtures {
    use serde_json::json;

    use crate::types::{ModelDescriptor, ModelType};

    pub fn llm_model(identifier: &str) -> ModelDescriptor {
        let mut model = ModelDescriptor::new(identifier, ModelType::Llm);
        model
            .extra
            .insert("provider_id".into(), json!("mock-provider"));
        model
            .extra
            .insert("metadata".into(), json!({ "context_length": 8192 }));
        model
    }

    pub fn embedding_model(identifier: &str) -> ModelDescriptor {
        let mut model = ModelDescriptor::new(identifier, ModelType::Embedding);
        model
            .extra
            .insert("metadata".into(), json!({ "embedding_dimension": 768 }));
        model
    }

    pub fn untyped_model(identifier: &str) -> ModelDescriptor {
        ModelDescriptor::new(identifier, ModelType::Unknown)
    }
}
