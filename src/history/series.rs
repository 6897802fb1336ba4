use crate::history::Snapshot;
use crate::types::model::ModelRecord;
use crate::types::scoring::Series;
use std::collections::HashMap;

pub fn derive_series(model_id: &str, snapshots: &[Snapshot], window: usize) -> Option<Series> {
    if snapshots.len() < 2 {
        return None;
    }

    let mut sorted = snapshots.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let series = sorted
        .windows(2)
        .filter_map(|pair| {
            let previous = pair[0].models.get(model_id)?.absolute_downloads()?;
            let current = pair[1].models.get(model_id)?.absolute_downloads()?;
            Some(current.saturating_sub(previous) as f64)
        })
        .collect::<Vec<_>>();

    if series.is_empty() || window == 0 {
        return None;
    }
    let start = series.len().saturating_sub(window);
    Some(series[start..].to_vec())
}

pub fn series_by_id(
    models: &[ModelRecord],
    snapshots: &[Snapshot],
    window: usize,
) -> HashMap<String, Series> {
    models
        .iter()
        .filter_map(|model| {
            derive_series(&model.id, snapshots, window).map(|series| (model.id.clone(), series))
        })
        .collect()
}
