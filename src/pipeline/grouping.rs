use crate::classification::ClassificationTable;
use crate::constants::DEFAULT_DOMAIN;
use crate::domain::{MentalModel, MentalModelCategory};
use crate::types::CatalogRecord;
use std::collections::HashMap;

/// Category buckets keyed by the domain they were resolved from
pub type CategoryBuckets = HashMap<String, MentalModelCategory>;

/// Buckets transformed models by their record's primary domain.
pub struct DomainGrouper<'a> {
    table: &'a ClassificationTable,
}

impl<'a> DomainGrouper<'a> {
    pub fn new(table: &'a ClassificationTable) -> Self {
        Self { table }
    }

    /// Models land in their bucket in source order. Records without domains
    /// count as `analysis`; domains missing from the table fold into the
    /// default bucket.
    pub fn group<'r, I>(&self, models: I) -> CategoryBuckets
    where
        I: IntoIterator<Item = (&'r CatalogRecord, MentalModel)>,
    {
        let mut buckets = CategoryBuckets::new();

        for (record, model) in models {
            let domain = record.primary_domain().unwrap_or(DEFAULT_DOMAIN);
            let key = self.table.bucket_key(domain);

            buckets
                .entry(key.to_string())
                .or_insert_with(|| {
                    let meta = self.table.category_for(key);
                    MentalModelCategory {
                        name: meta.name.clone(),
                        icon: meta.icon.clone(),
                        description: meta.description.clone(),
                        discipline: meta.discipline.clone(),
                        models: Vec::new(),
                    }
                })
                .models
                .push(model);
        }

        buckets
    }
}
