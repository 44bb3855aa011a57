use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use onboarding::config::DraftStoreConfig;
use onboarding::wizard::{
    DraftError, DraftStore, JsonFileDraftStore, SubmissionPayload, SubmissionSink, SubmitError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Draft store selected from configuration: file-backed when a path is set,
/// process-memory otherwise.
pub(crate) enum ServiceDraftStore {
    Memory(InMemoryDraftStore),
    File(JsonFileDraftStore),
}

impl ServiceDraftStore {
    pub(crate) fn from_config(config: &DraftStoreConfig) -> Self {
        match &config.path {
            Some(path) => Self::File(JsonFileDraftStore::new(path.clone())),
            None => Self::Memory(InMemoryDraftStore::default()),
        }
    }
}

impl DraftStore for ServiceDraftStore {
    fn save(&self, key: &str, draft: &str) -> Result<(), DraftError> {
        match self {
            Self::Memory(store) => store.save(key, draft),
            Self::File(store) => store.save(key, draft),
        }
    }

    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        match self {
            Self::Memory(store) => store.load(key),
            Self::File(store) => store.load(key),
        }
    }

    fn clear(&self, key: &str) -> Result<(), DraftError> {
        match self {
            Self::Memory(store) => store.clear(key),
            Self::File(store) => store.clear(key),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDraftStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl DraftStore for InMemoryDraftStore {
    fn save(&self, key: &str, draft: &str) -> Result<(), DraftError> {
        let mut guard = self.entries.lock().expect("draft mutex poisoned");
        guard.insert(key.to_string(), draft.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        let guard = self.entries.lock().expect("draft mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn clear(&self, key: &str) -> Result<(), DraftError> {
        let mut guard = self.entries.lock().expect("draft mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

/// Submission collaborator stub: records payloads and logs the handoff. A
/// production deployment would swap in the HR system transport here.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionSink {
    deliveries: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl InMemorySubmissionSink {
    pub(crate) fn deliveries(&self) -> Vec<SubmissionPayload> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for InMemorySubmissionSink {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        info!(
            department = %payload.job.department,
            position = %payload.job.position,
            age = payload.age,
            is_minor = payload.is_minor,
            "normalized onboarding submission received"
        );
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(payload.clone());
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
