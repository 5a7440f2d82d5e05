/// Catalog type tag selecting mental models in the tools table
pub const MENTAL_MODEL_CATALOG_TYPE: &str = "mental_model";

// Default table layout of the backing store
pub const DEFAULT_TOOLS_TABLE: &str = "tools";
pub const DEFAULT_TYPE_COLUMN: &str = "tool_type";
pub const DEFAULT_ACTIVE_COLUMN: &str = "is_active";
pub const AFFINITY_SELECT: &str =
    "*,tool_driver_affinities(affinity_type,strength,driver:drivers(slug,name))";

/// Domain used when a record carries no domain tags; also the default bucket
pub const DEFAULT_DOMAIN: &str = "analysis";

// Defaults applied by the record transformer
pub const UNNAMED_MODEL: &str = "Unnamed Model";
pub const UNKNOWN_SLUG: &str = "unknown";
pub const UNKNOWN_ORIGIN: &str = "Unknown origin";
pub const GENERAL_DISCIPLINE: &str = "General";

pub const AXIS_MIN: i64 = 1;
pub const AXIS_MAX: i64 = 10;
pub const AXIS_DEFAULT: i64 = 5;

/// Maximum number of driver identifiers kept per model
pub const MAX_DRIVER_AFFINITIES: usize = 5;

pub const DEFAULT_CONFIG_PATH: &str = "mind_catalog.toml";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
