use crate::error::{FrontierError, Result};
use crate::types::model::{ModelDetail, ModelRecord, Tag, TagDocument};
use serde::de::DeserializeOwned;
use std::path::Path;

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(FrontierError::PathNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| FrontierError::InvalidInput(path.display().to_string(), e.to_string()))
}

pub fn load_models(path: &Path) -> Result<Vec<ModelRecord>> {
    let models: Vec<ModelRecord> = read_document(path)?;
    tracing::debug!(path = %path.display(), models = models.len(), "loaded model batch");
    Ok(models)
}

pub fn load_details(path: &Path) -> Result<Vec<ModelDetail>> {
    read_document(path)
}

pub fn load_pipeline_tags(path: &Path) -> Result<Vec<Tag>> {
    let document: TagDocument = read_document(path)?;
    Ok(document.pipeline_tags())
}
