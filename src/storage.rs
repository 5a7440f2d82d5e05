use crate::constants::MENTAL_MODEL_CATALOG_TYPE;
use crate::error::{CatalogError, Result};
use crate::types::CatalogRecord;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// What a catalog query produced
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Active mental models, ordered by name ascending
    Records(Vec<CatalogRecord>),
    /// The deployment has no backing store; treated as an empty catalog
    Unconfigured,
}

/// Source of mental model records.
///
/// Implementations return only active records of the mental model catalog
/// type, ordered by name, each with its affinity relations embedded.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_mental_models(&self) -> Result<FetchOutcome>;
}

/// Store used when no backing store is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

#[async_trait]
impl CatalogStore for UnconfiguredStore {
    async fn fetch_mental_models(&self) -> Result<FetchOutcome> {
        debug!("No catalog store configured, returning empty catalog");
        Ok(FetchOutcome::Unconfigured)
    }
}

/// In-memory catalog for development/testing.
///
/// Applies the same selection as the remote query: `tool_type` equal to the
/// catalog type and `is_active` exactly true (NULL matches neither, as in
/// PostgREST `eq.` filters), ordered by name.
pub struct InMemoryCatalogStore {
    records: Arc<Mutex<Vec<CatalogRecord>>>,
    failing: AtomicBool,
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryCatalogStore {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            failing: AtomicBool::new(false),
        }
    }

    /// Load a JSON array of catalog rows
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<CatalogRecord> = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} catalog records from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::new(records))
    }

    pub fn replace_records(&self, records: Vec<CatalogRecord>) {
        let mut guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        *guard = records;
    }

    /// Make subsequent fetches fail as a backend error would
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn fetch_mental_models(&self) -> Result<FetchOutcome> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Query {
                status: 503,
                message: "in-memory catalog set to fail".to_string(),
            });
        }

        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut selected: Vec<CatalogRecord> = records
            .iter()
            .filter(|r| {
                r.tool_type.as_deref() == Some(MENTAL_MODEL_CATALOG_TYPE)
                    && r.is_active == Some(true)
            })
            .cloned()
            .collect();

        // Unnamed rows last, matching Postgres' default for ascending order
        selected.sort_by(|a, b| (a.name.is_none(), &a.name).cmp(&(b.name.is_none(), &b.name)));
        Ok(FetchOutcome::Records(selected))
    }
}
