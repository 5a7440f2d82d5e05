// Pure derivation stages: record -> model -> buckets -> ordered categories

pub mod affinity;
pub mod assemble;
pub mod grouping;
pub mod memo;
pub mod transform;

pub use affinity::AffinityRanker;
pub use assemble::CategoryAssembler;
pub use grouping::{CategoryBuckets, DomainGrouper};
pub use memo::CategoryMemo;
pub use transform::RecordTransformer;

use crate::classification::ClassificationTable;
use crate::domain::MentalModelCategory;
use crate::types::CatalogRecord;

/// Run every stage over a fetched record list.
pub fn derive_categories(
    records: &[CatalogRecord],
    table: &ClassificationTable,
) -> Vec<MentalModelCategory> {
    let transformer = RecordTransformer::new(table);
    let buckets = DomainGrouper::new(table)
        .group(records.iter().map(|r| (r, transformer.transform(r))));
    CategoryAssembler::assemble(buckets)
}
