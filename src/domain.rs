// View-model shapes handed to the presentation layer

use serde::{Deserialize, Serialize};

/// A catalog record after defaulting, clamping and affinity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalModel {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub origin: String,
    pub discipline: String,
    /// Always within 1..=10
    pub complexity: u8,
    /// Always within 1..=10
    pub applicability: u8,
    pub use_case: String,
    pub example: String,
    /// At most five driver identifiers, strongest first
    pub driver_affinities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalModelCategory {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub discipline: String,
    pub models: Vec<MentalModel>,
}
