// Remote catalog backends

pub mod supabase;

pub use supabase::SupabaseCatalogStore;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::storage::{CatalogStore, UnconfiguredStore};
use std::sync::Arc;
use tracing::info;

/// Pick the store a deployment should read from. A missing URL or key is a
/// deployment choice, not a failure: the catalog simply comes back empty.
pub fn store_from_config(config: &StoreConfig) -> Result<Arc<dyn CatalogStore>> {
    if !config.is_configured() {
        info!("Catalog store not configured; mental models will be empty");
        return Ok(Arc::new(UnconfiguredStore));
    }
    Ok(Arc::new(SupabaseCatalogStore::from_config(config)?))
}
