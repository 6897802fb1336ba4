pub mod file;
#[cfg(test)]
pub mod memory;
pub mod series;

use crate::error::Result;
use crate::types::model::ModelRecord;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use file::FileSnapshotStore;
pub use series::{derive_series, series_by_id};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCounters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads_all_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
}

impl SnapshotCounters {
    pub fn absolute_downloads(&self) -> Option<u64> {
        self.downloads_all_time.or(self.downloads)
    }
}

impl From<&ModelRecord> for SnapshotCounters {
    fn from(model: &ModelRecord) -> Self {
        Self {
            downloads_all_time: model.downloads_all_time,
            downloads: model.downloads,
            likes: model.likes,
            trending_score: model.trending_score,
        }
    }
}

/// One day's capture. `date` is `YYYY-MM-DD`, so lexical order is date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: String,
    pub models: BTreeMap<String, SnapshotCounters>,
}

impl Snapshot {
    pub fn capture(date: NaiveDate, models: &[ModelRecord]) -> Self {
        let models = models
            .iter()
            .map(|model| (model.id.clone(), SnapshotCounters::from(model)))
            .collect();
        Self {
            date: date_key(date),
            models,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended { date: String, models: usize },
    AlreadyCaptured { date: String },
}

pub trait SnapshotStore {
    /// Retained snapshots, oldest first. Never fails: missing or unreadable
    /// history is an empty log.
    fn load(&self) -> Vec<Snapshot>;

    fn append_on(&self, date: NaiveDate, models: &[ModelRecord]) -> Result<AppendOutcome>;

    fn append(&self, models: &[ModelRecord]) -> Result<AppendOutcome> {
        self.append_on(today(), models)
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn push_capture(
    history: &mut Vec<Snapshot>,
    date: NaiveDate,
    models: &[ModelRecord],
    max_snapshots: usize,
) -> Option<AppendOutcome> {
    let key = date_key(date);
    if history.iter().any(|snapshot| snapshot.date == key) {
        return None;
    }

    let snapshot = Snapshot::capture(date, models);
    let captured = snapshot.models.len();
    history.push(snapshot);
    history.sort_by(|a, b| a.date.cmp(&b.date));
    if history.len() > max_snapshots {
        let excess = history.len() - max_snapshots;
        history.drain(..excess);
    }
    Some(AppendOutcome::Appended {
        date: key,
        models: captured,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub days: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn history_stats(history: &[Snapshot]) -> HistoryStats {
    let first_date = history.iter().map(|snapshot| &snapshot.date).min().cloned();
    let last_date = history.iter().map(|snapshot| &snapshot.date).max().cloned();
    HistoryStats {
        days: history.len(),
        first_date,
        last_date,
    }
}

pub fn merge_batches(batches: Vec<Vec<ModelRecord>>) -> Vec<ModelRecord> {
    let mut merged: Vec<ModelRecord> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    for model in batches.into_iter().flatten() {
        match index_by_id.get(&model.id) {
            Some(&index) => merged[index] = model,
            None => {
                index_by_id.insert(model.id.clone(), merged.len());
                merged.push(model);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    fn model(id: &str, downloads_all_time: u64) -> ModelRecord {
        ModelRecord {
            downloads_all_time: Some(downloads_all_time),
            ..ModelRecord::new(id)
        }
    }

    #[test]
    fn counters_prefer_all_time_downloads() {
        let counters = SnapshotCounters {
            downloads_all_time: Some(500),
            downloads: Some(40),
            ..SnapshotCounters::default()
        };
        assert_eq!(counters.absolute_downloads(), Some(500));

        let window_only = SnapshotCounters {
            downloads: Some(40),
            ..SnapshotCounters::default()
        };
        assert_eq!(window_only.absolute_downloads(), Some(40));
    }

    #[test]
    fn push_capture_skips_existing_day() {
        let mut history = Vec::new();
        let first = push_capture(&mut history, day("2024-06-01"), &[model("a", 10)], 120);
        assert!(matches!(first, Some(AppendOutcome::Appended { models: 1, .. })));

        let second = push_capture(
            &mut history,
            day("2024-06-01"),
            &[model("a", 99), model("b", 5)],
            120,
        );
        assert!(second.is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].models["a"].downloads_all_time,
            Some(10),
            "first capture of the day must win"
        );
    }

    #[test]
    fn push_capture_evicts_oldest_beyond_cap() {
        let mut history = Vec::new();
        for offset in 0..5 {
            let date = day("2024-06-01") + chrono::Duration::days(offset);
            push_capture(&mut history, date, &[model("a", offset as u64)], 3);
        }
        let dates = history
            .iter()
            .map(|snapshot| snapshot.date.as_str())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2024-06-03", "2024-06-04", "2024-06-05"]);
    }

    #[test]
    fn history_stats_reports_bounds() {
        assert_eq!(
            history_stats(&[]),
            HistoryStats {
                days: 0,
                first_date: None,
                last_date: None
            }
        );

        let history = vec![
            Snapshot::capture(day("2024-06-03"), &[]),
            Snapshot::capture(day("2024-06-01"), &[]),
        ];
        let stats = history_stats(&history);
        assert_eq!(stats.days, 2);
        assert_eq!(stats.first_date.as_deref(), Some("2024-06-01"));
        assert_eq!(stats.last_date.as_deref(), Some("2024-06-03"));
    }

    #[test]
    fn merge_batches_keeps_first_order_and_latest_record() {
        let trending = vec![model("a", 1), model("b", 2)];
        let newest = vec![model("c", 3), model("a", 10)];
        let merged = merge_batches(vec![trending, newest]);
        let ids = merged.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged[0].downloads_all_time, Some(10));
    }

    #[test]
    fn snapshot_serializes_in_history_file_shape() {
        let snapshot = Snapshot::capture(
            day("2024-06-01"),
            &[ModelRecord {
                downloads: Some(7),
                likes: Some(2),
                ..ModelRecord::new("org/m")
            }],
        );
        let rendered = serde_json::to_value(&snapshot).expect("snapshot serializes");
        assert_eq!(
            rendered,
            serde_json::json!({
                "date": "2024-06-01",
                "models": {"org/m": {"downloads": 7, "likes": 2}}
            })
        );
    }
}
