use crate::classification::ClassificationTable;
use crate::domain::{MentalModel, MentalModelCategory};
use crate::error::CatalogError;
use crate::metrics::FetchTimer;
use crate::pipeline::CategoryMemo;
use crate::storage::{CatalogStore, FetchOutcome};
use crate::types::CatalogRecord;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Lifecycle of the catalog fetch
#[derive(Debug, Clone)]
pub enum FetchState {
    Idle,
    Loading,
    Success,
    Error(Arc<CatalogError>),
}

impl FetchState {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success => "success",
            FetchState::Error(_) => "error",
        }
    }
}

/// Everything the presentation layer needs to render the catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub loading: bool,
    #[serde(serialize_with = "error_message")]
    pub error: Option<Arc<CatalogError>>,
    pub total_models: usize,
    pub categories: Arc<Vec<MentalModelCategory>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

fn error_message<S: Serializer>(
    error: &Option<Arc<CatalogError>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

struct Inner {
    state: FetchState,
    records: Arc<Vec<CatalogRecord>>,
    error: Option<Arc<CatalogError>>,
    fetched_at: Option<DateTime<Utc>>,
    memo: CategoryMemo,
    latest_request: u64,
    torn_down: bool,
}

/// Owns the fetched record list and drives `idle -> loading -> success|error`.
///
/// Every fetch is numbered. A completion is applied only when it belongs to
/// the newest request and the orchestrator has not been torn down, so a slow
/// earlier fetch can never overwrite the result of a later `refetch`.
pub struct FetchOrchestrator {
    store: Arc<dyn CatalogStore>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for FetchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("FetchOrchestrator")
            .field("store", &"<Arc<dyn CatalogStore>>")
            .field("state", &inner.state.name())
            .field("records", &inner.records.len())
            .finish()
    }
}

impl FetchOrchestrator {
    pub fn new(store: Arc<dyn CatalogStore>, table: ClassificationTable) -> Self {
        Self {
            store,
            inner: Mutex::new(Inner {
                state: FetchState::Idle,
                records: Arc::new(Vec::new()),
                error: None,
                fetched_at: None,
                memo: CategoryMemo::new(Arc::new(table)),
                latest_request: 0,
                torn_down: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Initial load. Only fetches from `Idle`; later calls return the
    /// current state.
    pub async fn mount(&self) -> FetchState {
        {
            let inner = self.lock();
            if !matches!(inner.state, FetchState::Idle) {
                debug!("Catalog already mounted (state={})", inner.state.name());
                return inner.state.clone();
            }
        }
        self.refetch().await
    }

    /// Re-run the fetch from `loading`. Safe to call repeatedly and
    /// concurrently; the newest call decides the final state.
    #[instrument(skip(self))]
    pub async fn refetch(&self) -> FetchState {
        let request = {
            let mut inner = self.lock();
            if inner.torn_down {
                debug!("Refetch ignored after teardown");
                return inner.state.clone();
            }
            inner.latest_request += 1;
            inner.state = FetchState::Loading;
            inner.error = None;
            inner.latest_request
        };

        info!(request, "Fetching mental models");
        let timer = FetchTimer::start();
        let result = self.store.fetch_mental_models().await;

        let mut inner = self.lock();
        if inner.torn_down || request != inner.latest_request {
            debug!(
                request,
                latest = inner.latest_request,
                torn_down = inner.torn_down,
                "Discarding stale catalog result"
            );
            timer.stale();
            return inner.state.clone();
        }

        match result {
            Ok(FetchOutcome::Records(records)) => {
                info!(request, count = records.len(), "Loaded mental models");
                timer.success(records.len());
                inner.records = Arc::new(records);
                inner.state = FetchState::Success;
            }
            Ok(FetchOutcome::Unconfigured) => {
                info!(request, "Catalog store not configured; catalog is empty");
                timer.success(0);
                inner.records = Arc::new(Vec::new());
                inner.state = FetchState::Success;
            }
            Err(e) => {
                warn!(request, error = %e, "Mental model fetch failed");
                timer.failure();
                let error = Arc::new(e);
                inner.records = Arc::new(Vec::new());
                inner.error = Some(error.clone());
                inner.state = FetchState::Error(error);
            }
        }
        inner.fetched_at = Some(Utc::now());
        inner.state.clone()
    }

    /// Stop accepting results; any fetch still in flight is discarded when
    /// it resolves.
    pub fn teardown(&self) {
        let mut inner = self.lock();
        inner.torn_down = true;
        debug!("Catalog orchestrator torn down");
    }

    pub fn state(&self) -> FetchState {
        self.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lock().state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<Arc<CatalogError>> {
        self.lock().error.clone()
    }

    pub fn records(&self) -> Arc<Vec<CatalogRecord>> {
        self.lock().records.clone()
    }

    pub fn total_models(&self) -> usize {
        self.lock().records.len()
    }

    /// Derived categories, recomputed only when the record list changed.
    pub fn categories(&self) -> Arc<Vec<MentalModelCategory>> {
        let mut guard = self.lock();
        let Inner { memo, records, .. } = &mut *guard;
        memo.get_or_derive(records)
    }

    /// Look a model up by slug in the derived categories
    pub fn find_model(&self, slug: &str) -> Option<MentalModel> {
        self.categories()
            .iter()
            .flat_map(|c| c.models.iter())
            .find(|m| m.slug == slug)
            .cloned()
    }

    /// Snapshot taken under a single lock, so the categories and the count
    /// always come from the same record list.
    pub fn view(&self) -> CatalogView {
        let mut guard = self.lock();
        let Inner {
            state,
            records,
            error,
            fetched_at,
            memo,
            ..
        } = &mut *guard;
        CatalogView {
            loading: matches!(state, FetchState::Loading),
            error: error.clone(),
            total_models: records.len(),
            categories: memo.get_or_derive(records),
            fetched_at: *fetched_at,
        }
    }

    /// Number of times the derivation pipeline has actually run
    pub fn derivations(&self) -> u64 {
        self.lock().memo.derivations()
    }
}
