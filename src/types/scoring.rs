use crate::types::model::ModelRecord;
use serde::Serialize;
use std::fmt;

pub type Series = Vec<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrontierWeights {
    pub velocity: f64,
    pub trending: f64,
    pub likes: f64,
    pub recency: f64,
    pub momentum: f64,
}

impl Default for FrontierWeights {
    fn default() -> Self {
        Self {
            velocity: 0.4,
            trending: 0.2,
            likes: 0.2,
            recency: 0.1,
            momentum: 0.1,
        }
    }
}

impl FrontierWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.velocity,
            self.trending,
            self.likes,
            self.recency,
            self.momentum,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendLabel {
    Breakout,
    Cooling,
    New,
    Steady,
}

impl TrendLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakout => "Breakout",
            Self::Cooling => "Cooling",
            Self::New => "New",
            Self::Steady => "Steady",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredModel {
    #[serde(flatten)]
    pub model: ModelRecord,
    pub velocity: f64,
    pub acceleration: f64,
    pub recency_days: i64,
    pub baseline_velocity: f64,
    pub lift: f64,
    pub frontier_score: f64,
    pub momentum_ratio: f64,
    pub decay_score: f64,
    pub trend_label: TrendLabel,
    pub series: Series,
}

impl ScoredModel {
    pub fn id(&self) -> &str {
        &self.model.id
    }
}
