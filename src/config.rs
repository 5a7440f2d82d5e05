use crate::classification::{CategoryMeta, ClassificationTable};
use crate::constants::{
    DEFAULT_ACTIVE_COLUMN, DEFAULT_CONFIG_PATH, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TOOLS_TABLE,
    DEFAULT_TYPE_COLUMN, MENTAL_MODEL_CATALOG_TYPE,
};
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    /// Replaces the built-in category table when non-empty
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Replaces the built-in discipline lookup when non-empty
    #[serde(default)]
    pub disciplines: HashMap<String, String>,
}

/// Connection and query settings for the remote catalog
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub type_column: String,
    pub active_column: String,
    pub catalog_type: String,
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: DEFAULT_TOOLS_TABLE.to_string(),
            type_column: DEFAULT_TYPE_COLUMN.to_string(),
            active_column: DEFAULT_ACTIVE_COLUMN.to_string(),
            catalog_type: MENTAL_MODEL_CATALOG_TYPE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl StoreConfig {
    /// Both a URL and a key are needed to reach the store
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.url) && present(&self.api_key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub domain: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discipline: String,
}

impl Config {
    /// Load from an explicit path, or from `mind_catalog.toml` if present,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// SUPABASE_URL (or SUPABASE_PROJECT_REF) and SUPABASE_ANON_KEY (or
    /// SUPABASE_SERVICE_ROLE_KEY) take precedence over the file.
    pub fn apply_env(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let url = var("SUPABASE_URL").or_else(|| {
            var("SUPABASE_PROJECT_REF").map(|r| format!("https://{}.supabase.co", r))
        });
        if url.is_some() {
            self.store.url = url;
        }

        let key = var("SUPABASE_ANON_KEY").or_else(|| var("SUPABASE_SERVICE_ROLE_KEY"));
        if key.is_some() {
            self.store.api_key = key;
        }
    }

    pub fn classification_table(&self) -> Result<ClassificationTable> {
        if self.categories.is_empty() && self.disciplines.is_empty() {
            return Ok(ClassificationTable::default());
        }

        let (default_categories, default_disciplines) = ClassificationTable::default().into_parts();

        let categories = if self.categories.is_empty() {
            default_categories
        } else {
            self.categories
                .iter()
                .map(|c| {
                    (
                        c.domain.clone(),
                        CategoryMeta {
                            name: c.name.clone(),
                            icon: c.icon.clone(),
                            description: c.description.clone(),
                            discipline: c.discipline.clone(),
                        },
                    )
                })
                .collect()
        };

        let disciplines = if self.disciplines.is_empty() {
            default_disciplines
        } else {
            self.disciplines.clone()
        };

        ClassificationTable::new(categories, disciplines)
    }
}
