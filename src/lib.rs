pub mod classification;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod gateway;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use classification::{CategoryMeta, ClassificationTable};
pub use domain::{MentalModel, MentalModelCategory};
pub use error::{CatalogError, Result};
pub use orchestrator::{CatalogView, FetchOrchestrator, FetchState};
pub use storage::{CatalogStore, FetchOutcome, InMemoryCatalogStore, UnconfiguredStore};
pub use types::{AffinityRecord, AffinityType, CatalogRecord, DriverRef};
