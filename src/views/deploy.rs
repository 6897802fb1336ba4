use crate::types::model::{ModelDetail, ModelRecord};
use serde::Serialize;

const PERMISSIVE_LICENSES: [&str; 8] = [
    "apache-2.0",
    "mit",
    "bsd",
    "bsd-3-clause",
    "cc-by-4.0",
    "cc-by",
    "isc",
    "mpl-2.0",
];

const THUMBNAIL_BASE: &str = "https://cdn-thumbnails.huggingface.co/social-thumbnails/papers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub license: Option<String>,
    pub is_permissive: bool,
}

fn first_with_prefix<'a>(tags: &'a [String], prefix: &str) -> Option<&'a str> {
    tags.iter().find_map(|tag| tag.strip_prefix(prefix))
}

pub fn extract_license(tags: &[String]) -> LicenseInfo {
    let license = first_with_prefix(tags, "license:").map(str::to_string);
    let is_permissive = license
        .as_deref()
        .map(|license| PERMISSIVE_LICENSES.contains(&license))
        .unwrap_or(false);
    LicenseInfo {
        license,
        is_permissive,
    }
}

pub fn extract_arxiv_id(tags: &[String]) -> Option<String> {
    first_with_prefix(tags, "arxiv:").map(str::to_string)
}

pub fn paper_thumbnail(arxiv_id: Option<&str>) -> Option<String> {
    arxiv_id.map(|id| format!("{THUMBNAIL_BASE}/{id}.png"))
}

pub fn extract_datasets(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter_map(|tag| tag.strip_prefix("dataset:"))
        .map(str::to_string)
        .collect()
}

pub fn extract_languages(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.chars().count() == 2 || tag.starts_with("lang:"))
        .cloned()
        .collect()
}

pub fn provider_count(detail: &ModelDetail) -> usize {
    detail
        .inference_provider_mapping
        .as_ref()
        .map_or(0, |mapping| mapping.len())
}

pub fn is_deployable(detail: &ModelDetail) -> bool {
    let safetensors = detail
        .safetensors
        .as_ref()
        .and_then(|artifact| artifact.total)
        .unwrap_or(0);
    let gguf = detail
        .gguf
        .as_ref()
        .and_then(|artifact| artifact.total)
        .unwrap_or(0);
    provider_count(detail) > 0 || safetensors > 0 || gguf > 0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMeta {
    pub id: String,
    #[serde(flatten)]
    pub license: LicenseInfo,
    pub arxiv_id: Option<String>,
    pub paper_thumbnail: Option<String>,
    pub datasets: Vec<String>,
    pub languages: Vec<String>,
    pub provider_count: usize,
    pub deployable: bool,
}

pub fn attach_signal_meta(model: &ModelRecord) -> SignalMeta {
    let arxiv_id = extract_arxiv_id(&model.tags);
    SignalMeta {
        id: model.id.clone(),
        license: extract_license(&model.tags),
        paper_thumbnail: paper_thumbnail(arxiv_id.as_deref()),
        arxiv_id,
        datasets: extract_datasets(&model.tags),
        languages: extract_languages(&model.tags),
        provider_count: 0,
        deployable: false,
    }
}

pub fn detail_signal_meta(detail: &ModelDetail) -> SignalMeta {
    SignalMeta {
        provider_count: provider_count(detail),
        deployable: is_deployable(detail),
        ..attach_signal_meta(&detail.record)
    }
}
