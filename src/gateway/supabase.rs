use crate::config::StoreConfig;
use crate::constants::AFFINITY_SELECT;
use crate::error::{CatalogError, Result};
use crate::storage::{CatalogStore, FetchOutcome};
use crate::types::CatalogRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Reads mental models from a Supabase (PostgREST) `tools` table with the
/// driver affinities embedded through the `tool_driver_affinities` relation.
pub struct SupabaseCatalogStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    query: Vec<(String, String)>,
}

impl std::fmt::Debug for SupabaseCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseCatalogStore")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SupabaseCatalogStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("catalog store URL is not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("catalog store key is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: Self::endpoint(url, &config.table),
            api_key,
            query: Self::query_params(config),
        })
    }

    fn endpoint(url: &str, table: &str) -> String {
        format!("{}/rest/v1/{}", url.trim_end_matches('/'), table)
    }

    /// `select` with embedded affinities, catalog type and active filters,
    /// name ascending
    fn query_params(config: &StoreConfig) -> Vec<(String, String)> {
        vec![
            ("select".to_string(), AFFINITY_SELECT.to_string()),
            (config.type_column.clone(), format!("eq.{}", config.catalog_type)),
            (config.active_column.clone(), "eq.true".to_string()),
            ("order".to_string(), "name.asc".to_string()),
        ]
    }
}

#[async_trait]
impl CatalogStore for SupabaseCatalogStore {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_mental_models(&self) -> Result<FetchOutcome> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&self.query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Query {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        let records: Vec<CatalogRecord> = serde_json::from_slice(&bytes)?;
        debug!("Catalog query returned {} records", records.len());
        Ok(FetchOutcome::Records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> StoreConfig {
        StoreConfig {
            url: Some("https://abc.supabase.co/".to_string()),
            api_key: Some("anon-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_and_query() {
        let store = SupabaseCatalogStore::from_config(&configured()).unwrap();
        assert_eq!(store.endpoint, "https://abc.supabase.co/rest/v1/tools");
        assert_eq!(
            store.query,
            vec![
                ("select".to_string(), AFFINITY_SELECT.to_string()),
                ("tool_type".to_string(), "eq.mental_model".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let store = SupabaseCatalogStore::from_config(&configured()).unwrap();
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("anon-key"));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = StoreConfig {
            api_key: None,
            ..configured()
        };
        assert!(matches!(
            SupabaseCatalogStore::from_config(&config),
            Err(CatalogError::Config(_))
        ));
    }
}
