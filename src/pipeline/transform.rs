use crate::classification::ClassificationTable;
use crate::constants::{
    AXIS_DEFAULT, AXIS_MAX, AXIS_MIN, UNKNOWN_ORIGIN, UNKNOWN_SLUG, UNNAMED_MODEL,
};
use crate::domain::MentalModel;
use crate::pipeline::affinity::AffinityRanker;
use crate::types::CatalogRecord;

/// Maps raw catalog records onto the `MentalModel` view model. Total: sparse
/// records are filled with defaults, never rejected.
pub struct RecordTransformer<'a> {
    table: &'a ClassificationTable,
}

impl<'a> RecordTransformer<'a> {
    pub fn new(table: &'a ClassificationTable) -> Self {
        Self { table }
    }

    pub fn transform(&self, record: &CatalogRecord) -> MentalModel {
        let schema = &record.schema;
        let first_example = schema.examples.as_deref().and_then(|e| e.first());

        MentalModel {
            name: text_or(record.name.as_deref(), UNNAMED_MODEL),
            slug: text_or(record.slug.as_deref(), UNKNOWN_SLUG),
            description: text_or(record.description.as_deref(), ""),
            origin: text_or(record.origin_author.as_deref(), UNKNOWN_ORIGIN),
            discipline: self
                .table
                .discipline_for(record.primary_domain())
                .to_string(),
            complexity: axis_score(record.axis_rigidity),
            applicability: axis_score(record.axis_prescriptive),
            use_case: text_or(
                schema
                    .when_to_apply
                    .as_deref()
                    .and_then(|w| w.first())
                    .map(String::as_str),
                "",
            ),
            example: text_or(
                first_example.and_then(|e| {
                    non_empty(e.application.as_deref()).or(e.insight.as_deref())
                }),
                "",
            ),
            driver_affinities: AffinityRanker::rank(record.affinities()),
        }
    }
}

/// Clamp a raw axis onto 1..=10; an absent (or NaN) axis scores exactly 5.
pub fn axis_score(raw: Option<f64>) -> u8 {
    match raw {
        Some(v) if !v.is_nan() => {
            (v.round().clamp(AXIS_MIN as f64, AXIS_MAX as f64)) as u8
        }
        _ => AXIS_DEFAULT as u8,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn text_or(value: Option<&str>, default: &str) -> String {
    non_empty(value).unwrap_or(default).to_string()
}
