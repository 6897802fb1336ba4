use crate::error::FrontierError;
use crate::types::scoring::FrontierWeights;
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_HISTORY_PATH: &str = "data/history.json";
pub const DEFAULT_MAX_SNAPSHOTS: usize = 120;
pub const DEFAULT_SERIES_WINDOW: usize = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontierConfig {
    pub history: Option<HistoryConfig>,
    pub scoring: Option<ScoringConfig>,
    pub leaderboard: Option<LeaderboardConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
    pub max_snapshots: Option<usize>,
    pub series_window: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    pub limit: Option<usize>,
    pub highlight_limit: Option<usize>,
    pub new_within_days: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardLimits {
    pub limit: usize,
    pub highlight_limit: usize,
    pub new_within_days: i64,
}

impl Default for LeaderboardLimits {
    fn default() -> Self {
        Self {
            limit: 20,
            highlight_limit: 5,
            new_within_days: 7,
        }
    }
}

const ALLOWED_WEIGHT_KEYS: [&str; 5] = ["velocity", "trending", "likes", "recency", "momentum"];

impl FrontierConfig {
    pub fn history_path(&self) -> &str {
        self.history
            .as_ref()
            .and_then(|history| history.path.as_deref())
            .unwrap_or(DEFAULT_HISTORY_PATH)
    }

    pub fn max_snapshots(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|history| history.max_snapshots)
            .unwrap_or(DEFAULT_MAX_SNAPSHOTS)
    }

    pub fn series_window(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|history| history.series_window)
            .unwrap_or(DEFAULT_SERIES_WINDOW)
    }

    pub fn weights(&self) -> FrontierWeights {
        let defaults = FrontierWeights::default();
        match self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            Some(weights) => FrontierWeights {
                velocity: *weights.get("velocity").unwrap_or(&defaults.velocity),
                trending: *weights.get("trending").unwrap_or(&defaults.trending),
                likes: *weights.get("likes").unwrap_or(&defaults.likes),
                recency: *weights.get("recency").unwrap_or(&defaults.recency),
                momentum: *weights.get("momentum").unwrap_or(&defaults.momentum),
            },
            None => defaults,
        }
    }

    pub fn leaderboard_limits(&self) -> LeaderboardLimits {
        let defaults = LeaderboardLimits::default();
        match &self.leaderboard {
            Some(leaderboard) => LeaderboardLimits {
                limit: leaderboard.limit.unwrap_or(defaults.limit),
                highlight_limit: leaderboard
                    .highlight_limit
                    .unwrap_or(defaults.highlight_limit),
                new_within_days: leaderboard
                    .new_within_days
                    .unwrap_or(defaults.new_within_days),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), FrontierError> {
        if let Some(history) = &self.history {
            if history.max_snapshots == Some(0) {
                return Err(FrontierError::ConfigParse(
                    "history.max_snapshots must be greater than 0".to_string(),
                ));
            }
            if history.series_window == Some(0) {
                return Err(FrontierError::ConfigParse(
                    "history.series_window must be greater than 0".to_string(),
                ));
            }
            if let Some(path) = &history.path {
                if path.trim().is_empty() {
                    return Err(FrontierError::ConfigParse(
                        "history.path must not be empty".to_string(),
                    ));
                }
            }
        }

        if let Some(weights) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            let unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(FrontierError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = self.weights();
        if weights
            .as_array()
            .iter()
            .any(|weight| !(0.0..=1.0).contains(weight))
        {
            return Err(FrontierError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = weights.sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(FrontierError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(leaderboard) = &self.leaderboard {
            if leaderboard.limit == Some(0) {
                return Err(FrontierError::ConfigParse(
                    "leaderboard.limit must be greater than 0".to_string(),
                ));
            }
            if let Some(days) = leaderboard.new_within_days {
                if !(0..=60).contains(&days) {
                    return Err(FrontierError::ConfigParse(
                        "leaderboard.new_within_days must be between 0 and 60".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
