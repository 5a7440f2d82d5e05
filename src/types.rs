use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A mental model row as returned by the backing store, with its nested
/// affinity relations embedded under `tool_driver_affinities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_schema")]
    pub schema: ToolSchema,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub axis_rigidity: Option<f64>,
    #[serde(default)]
    pub axis_prescriptive: Option<f64>,
    #[serde(default)]
    pub origin_author: Option<String>,
    #[serde(default)]
    pub tool_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub tool_driver_affinities: Option<Vec<AffinityRecord>>,
}

impl CatalogRecord {
    /// First domain tag; a null or empty first tag counts as absent
    pub fn primary_domain(&self) -> Option<&str> {
        self.domains
            .as_deref()
            .and_then(|d| d.first())
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    pub fn affinities(&self) -> &[AffinityRecord] {
        self.tool_driver_affinities.as_deref().unwrap_or(&[])
    }
}

/// Free-form schema object; only the fields the catalog view reads are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub when_to_apply: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_examples")]
    pub examples: Option<Vec<SchemaExample>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaExample {
    #[serde(default, deserialize_with = "lenient_text")]
    pub application: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub insight: Option<String>,
}

// Store payloads are only loosely shaped: every helper below maps a value of
// the wrong type to "absent" instead of failing the whole fetch.

/// Null or non-object schema payloads become an empty schema.
fn lenient_schema<'de, D>(deserializer: D) -> std::result::Result<ToolSchema, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Arrays keep their string elements; null or non-string elements become
/// empty strings so positions (and the first element) are preserved.
fn lenient_string_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
    ))
}

fn lenient_examples<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<SchemaExample>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    ))
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Relation kind between a tool and a driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AffinityType {
    Enables,
    Requires,
    /// Any other tag (`conflicts`, `mitigates`, ...). Never ranked.
    Other(String),
}

impl Default for AffinityType {
    fn default() -> Self {
        AffinityType::Other(String::new())
    }
}

impl From<String> for AffinityType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "enables" => AffinityType::Enables,
            "requires" => AffinityType::Requires,
            _ => AffinityType::Other(tag),
        }
    }
}

impl From<AffinityType> for String {
    fn from(kind: AffinityType) -> Self {
        match kind {
            AffinityType::Enables => "enables".to_string(),
            AffinityType::Requires => "requires".to_string(),
            AffinityType::Other(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffinityRecord {
    #[serde(default)]
    pub affinity_type: AffinityType,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub driver: Option<DriverRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverRef {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_record_deserializes() {
        let record: CatalogRecord = serde_json::from_value(json!({
            "name": "Inversion",
            "schema": null,
            "domains": null,
            "axis_rigidity": 12
        }))
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Inversion"));
        assert_eq!(record.schema, ToolSchema::default());
        assert_eq!(record.primary_domain(), None);
        assert_eq!(record.axis_rigidity, Some(12.0));
        assert!(record.affinities().is_empty());
    }

    #[test]
    fn test_malformed_schema_falls_back_to_empty() {
        let record: CatalogRecord = serde_json::from_value(json!({
            "schema": { "when_to_apply": "not a list" }
        }))
        .unwrap();
        assert_eq!(record.schema, ToolSchema::default());
    }

    #[test]
    fn test_null_domain_elements_do_not_fail_the_batch() {
        let records: Vec<CatalogRecord> = serde_json::from_value(json!([
            { "domains": ["economics"] },
            { "domains": [null] },
            { "domains": [null, "strategy"] },
            { "domains": [""] },
            { "domains": "economics" }
        ]))
        .unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].primary_domain(), Some("economics"));
        assert_eq!(records[1].primary_domain(), None);
        assert_eq!(records[2].primary_domain(), None);
        assert_eq!(records[3].primary_domain(), None);
        assert_eq!(records[4].primary_domain(), None);
    }

    #[test]
    fn test_bad_schema_field_keeps_the_others() {
        let record: CatalogRecord = serde_json::from_value(json!({
            "schema": {
                "when_to_apply": "not a list",
                "examples": [{ "application": "Pre-mortems" }]
            }
        }))
        .unwrap();
        assert_eq!(record.schema.when_to_apply, None);
        assert_eq!(
            record.schema.examples.as_deref().and_then(|e| e.first()),
            Some(&SchemaExample {
                application: Some("Pre-mortems".to_string()),
                insight: None,
            })
        );

        let record: CatalogRecord = serde_json::from_value(json!({
            "schema": {
                "when_to_apply": [null, "During reviews"],
                "examples": [42, { "application": 7, "insight": "Work backwards" }]
            }
        }))
        .unwrap();
        assert_eq!(
            record.schema.when_to_apply,
            Some(vec![String::new(), "During reviews".to_string()])
        );
        let examples = record.schema.examples.unwrap();
        assert_eq!(examples[0], SchemaExample::default());
        assert_eq!(examples[1].application, None);
        assert_eq!(examples[1].insight.as_deref(), Some("Work backwards"));
    }

    #[test]
    fn test_affinity_type_tags() {
        let affinities: Vec<AffinityRecord> = serde_json::from_value(json!([
            { "affinity_type": "enables", "strength": 0.5, "driver": { "slug": "a" } },
            { "affinity_type": "requires" },
            { "affinity_type": "conflicts", "driver": null }
        ]))
        .unwrap();

        assert_eq!(affinities[0].affinity_type, AffinityType::Enables);
        assert_eq!(affinities[1].affinity_type, AffinityType::Requires);
        assert_eq!(
            affinities[2].affinity_type,
            AffinityType::Other("conflicts".to_string())
        );
        assert!(affinities[2].driver.is_none());
    }
}
