use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// Blank or malformed timestamps read as absent instead of failing the batch.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text.trim()).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        rename = "pipeline_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub pipeline_tag: Option<String>,
    #[serde(
        default,
        rename = "library_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub library_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads_all_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
}

impl ModelRecord {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.last_modified)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactTotals {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetail {
    #[serde(flatten)]
    pub record: ModelRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_provider_mapping: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gguf: Option<ArtifactTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safetensors: Option<ArtifactTotals>,
    #[serde(
        default,
        rename = "model-index",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_index: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl Tag {
    pub fn pipeline(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            kind: "pipeline_tag".to_string(),
            sub_type: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagDocument {
    Flat(Vec<Tag>),
    ByType(BTreeMap<String, Vec<Tag>>),
}

impl TagDocument {
    pub fn pipeline_tags(self) -> Vec<Tag> {
        match self {
            TagDocument::Flat(tags) => tags,
            TagDocument::ByType(mut by_type) => by_type.remove("pipeline_tag").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_record_parses_hub_list_shape() {
        let record: ModelRecord = serde_json::from_str(
            r#"{
                "id": "org/model",
                "pipeline_tag": "text-generation",
                "library_name": "transformers",
                "tags": ["license:mit", "arxiv:2401.00001"],
                "downloads": 3000,
                "downloadsAllTime": 90000,
                "likes": 50,
                "trendingScore": 12.5,
                "createdAt": "2024-05-01T12:00:00.000Z",
                "private": false
            }"#,
        )
        .expect("record should parse");

        assert_eq!(record.id, "org/model");
        assert_eq!(record.pipeline_tag.as_deref(), Some("text-generation"));
        assert_eq!(record.downloads_all_time, Some(90000));
        assert_eq!(record.trending_score, Some(12.5));
        assert!(record.created_at.is_some());
        assert_eq!(record.reference_time(), record.created_at);
    }

    #[test]
    fn model_record_tolerates_missing_fields() {
        let record: ModelRecord =
            serde_json::from_str(r#"{"id": "bare"}"#).expect("bare record should parse");
        assert_eq!(record, ModelRecord::new("bare"));
        assert!(record.reference_time().is_none());
    }

    #[test]
    fn blank_or_malformed_timestamps_fall_back() {
        let batch: Vec<ModelRecord> = serde_json::from_str(
            r#"[
                {"id": "ok", "createdAt": "2024-05-01T12:00:00Z"},
                {"id": "blank", "createdAt": "", "lastModified": "2024-06-01T00:00:00Z"},
                {"id": "garbled", "createdAt": "yesterday", "lastModified": 17}
            ]"#,
        )
        .expect("batch with bad timestamps should still parse");

        assert_eq!(batch.len(), 3);
        assert!(batch[0].created_at.is_some());
        assert!(batch[1].created_at.is_none());
        assert_eq!(
            batch[1].reference_time().map(|time| time.to_rfc3339()),
            Some("2024-06-01T00:00:00+00:00".to_string())
        );
        assert!(batch[2].reference_time().is_none());
    }

    #[test]
    fn detail_parses_deployment_fields() {
        let detail: ModelDetail = serde_json::from_str(
            r#"{
                "id": "org/model",
                "inferenceProviderMapping": {"together": {"status": "live"}},
                "gguf": {"total": 4},
                "safetensors": {"parameters": 7000000000, "total": 7000000000},
                "model-index": []
            }"#,
        )
        .expect("detail should parse");

        assert_eq!(detail.record.id, "org/model");
        assert_eq!(detail.gguf.and_then(|gguf| gguf.total), Some(4));
        assert_eq!(
            detail.inference_provider_mapping.map(|mapping| mapping.len()),
            Some(1)
        );
    }

    #[test]
    fn tag_document_accepts_both_shapes() {
        let flat: TagDocument =
            serde_json::from_str(r#"[{"id": "text-generation", "label": "Text Generation", "type": "pipeline_tag"}]"#)
                .expect("flat tags should parse");
        assert_eq!(flat.pipeline_tags().len(), 1);

        let by_type: TagDocument = serde_json::from_str(
            r#"{
                "pipeline_tag": [{"id": "image-classification", "label": "Image Classification", "type": "pipeline_tag", "subType": "cv"}],
                "library": [{"id": "transformers", "label": "Transformers", "type": "library"}]
            }"#,
        )
        .expect("typed tags should parse");
        let tags = by_type.pipeline_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].sub_type.as_deref(), Some("cv"));
    }
}
