use crate::error::{FrontierError, Result};
use crate::history::{date_key, push_capture, AppendOutcome, Snapshot, SnapshotStore};
use crate::types::config::DEFAULT_MAX_SNAPSHOTS;
use crate::types::model::ModelRecord;
use chrono::NaiveDate;
use std::sync::Mutex;

pub struct MemorySnapshotStore {
    snapshots: Mutex<Vec<Snapshot>>,
    max_snapshots: usize,
}

impl MemorySnapshotStore {
    pub fn new(max_snapshots: usize) -> Self {
        Self::with_history(Vec::new(), max_snapshots)
    }

    pub fn with_history(history: Vec<Snapshot>, max_snapshots: usize) -> Self {
        Self {
            snapshots: Mutex::new(history),
            max_snapshots: max_snapshots.max(1),
        }
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SNAPSHOTS)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Vec<Snapshot> {
        self.snapshots
            .lock()
            .map(|snapshots| snapshots.clone())
            .unwrap_or_default()
    }

    fn append_on(&self, date: NaiveDate, models: &[ModelRecord]) -> Result<AppendOutcome> {
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|_| FrontierError::SnapshotWrite("snapshot log lock poisoned".to_string()))?;
        Ok(
            push_capture(&mut snapshots, date, models, self.max_snapshots).unwrap_or(
                AppendOutcome::AlreadyCaptured {
                    date: date_key(date),
                },
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::today;
    use std::sync::Arc;
    use std::thread;

    fn model(id: &str, downloads: u64) -> ModelRecord {
        ModelRecord {
            downloads: Some(downloads),
            ..ModelRecord::new(id)
        }
    }

    #[test]
    fn append_uses_today_and_is_idempotent() {
        let store = MemorySnapshotStore::default();
        let first = store.append(&[model("a", 10)]).expect("append succeeds");
        assert_eq!(
            first,
            AppendOutcome::Appended {
                date: date_key(today()),
                models: 1
            }
        );

        let second = store
            .append(&[model("a", 20), model("b", 5)])
            .expect("append succeeds");
        assert!(matches!(second, AppendOutcome::AlreadyCaptured { .. }));

        let history = store.load();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].models["a"].downloads, Some(10));
    }

    #[test]
    fn seeded_history_is_capped_on_append() {
        let seeded = ["2024-06-01", "2024-06-02"]
            .iter()
            .map(|date| Snapshot {
                date: date.to_string(),
                models: Default::default(),
            })
            .collect::<Vec<_>>();
        let store = MemorySnapshotStore::with_history(seeded, 2);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");

        store
            .append_on(day, &[model("a", 1)])
            .expect("append succeeds");

        let dates = store
            .load()
            .into_iter()
            .map(|snapshot| snapshot.date)
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2024-06-02", "2024-06-03"]);
    }

    #[test]
    fn concurrent_appends_on_same_day_write_once() {
        let store = Arc::new(MemorySnapshotStore::default());
        let handles = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .append(&[model("a", worker)])
                        .expect("append succeeds")
                })
            })
            .collect::<Vec<_>>();

        let appended = handles
            .into_iter()
            .map(|handle| handle.join().expect("worker should not panic"))
            .filter(|outcome| matches!(outcome, AppendOutcome::Appended { .. }))
            .count();

        assert_eq!(appended, 1);
        assert_eq!(store.load().len(), 1);
    }
}
