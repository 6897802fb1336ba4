use crate::history::HistoryStats;
use crate::types::scoring::ScoredModel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRollup {
    pub id: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub models: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardReport {
    pub generated_at: String,
    pub history: HistoryStats,
    pub model_count: usize,
    pub frontier: Vec<ScoredModel>,
    pub breakouts: Vec<ScoredModel>,
    pub new_models: Vec<ScoredModel>,
    pub lift_ladder: Vec<ScoredModel>,
    pub momentum_share: Vec<ScoredModel>,
    pub cooling: Vec<ScoredModel>,
    pub category_velocity: Vec<CategoryRollup>,
    pub category_cooling: Vec<CategoryRollup>,
}

impl LeaderboardReport {
    pub fn has_daily_history(&self) -> bool {
        self.frontier.iter().any(|model| !model.series.is_empty())
    }
}
