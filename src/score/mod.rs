pub mod signals;
pub mod trend;

use crate::types::model::ModelRecord;
use crate::types::scoring::{FrontierWeights, ScoredModel, Series};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use trend::TrendInputs;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchNormalizers {
    pub max_velocity: f64,
    pub max_likes: f64,
    pub max_trending: f64,
}

impl BatchNormalizers {
    fn from_batch(models: &[ModelRecord], velocities: &[f64]) -> Self {
        let max_velocity = velocities.iter().copied().fold(1.0, f64::max);
        let max_likes = models
            .iter()
            .map(|model| model.likes.unwrap_or(0) as f64)
            .fold(1.0, f64::max);
        let max_trending = models
            .iter()
            .map(|model| model.trending_score.unwrap_or(0.0))
            .fold(1.0, f64::max);
        Self {
            max_velocity,
            max_likes,
            max_trending,
        }
    }
}

pub fn score_models(
    models: &[ModelRecord],
    history_series: Option<&HashMap<String, Series>>,
    weights: &FrontierWeights,
) -> Vec<ScoredModel> {
    score_models_at(models, history_series, weights, Utc::now())
}

pub fn score_models_at(
    models: &[ModelRecord],
    history_series: Option<&HashMap<String, Series>>,
    weights: &FrontierWeights,
    now: DateTime<Utc>,
) -> Vec<ScoredModel> {
    let series = models
        .iter()
        .map(|model| {
            history_series
                .and_then(|by_id| by_id.get(&model.id))
                .cloned()
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();
    let velocities = models
        .iter()
        .zip(&series)
        .map(|(model, series)| signals::velocity(series, model.downloads))
        .collect::<Vec<_>>();
    let normalizers = BatchNormalizers::from_batch(models, &velocities);

    tracing::debug!(
        models = models.len(),
        with_history = series.iter().filter(|series| !series.is_empty()).count(),
        max_velocity = normalizers.max_velocity,
        "scoring batch"
    );

    models
        .iter()
        .zip(series)
        .zip(velocities)
        .map(|((model, series), velocity)| {
            score_one(model, series, velocity, &normalizers, weights, now)
        })
        .collect()
}

fn score_one(
    model: &ModelRecord,
    series: Series,
    velocity: f64,
    normalizers: &BatchNormalizers,
    weights: &FrontierWeights,
    now: DateTime<Utc>,
) -> ScoredModel {
    let age_days = signals::age_days(model.reference_time(), now);
    let recency_days = signals::recency_days(age_days);
    let recency_boost = signals::recency_boost(recency_days);
    let acceleration = signals::acceleration(&series, model.trending_score, model.downloads);
    let momentum_ratio = signals::momentum_ratio(velocity, model.downloads_all_time);
    let baseline_velocity = signals::baseline_velocity(model.downloads_all_time, age_days);
    let lift = signals::lift(velocity, baseline_velocity);
    let decay_score = signals::decay_score(&series);

    let likes = model.likes.unwrap_or(0) as f64;
    let trending_score = model.trending_score.unwrap_or(0.0);
    let frontier_score = weights.velocity * (velocity / normalizers.max_velocity)
        + weights.trending * (trending_score / normalizers.max_trending)
        + weights.likes * (likes / normalizers.max_likes)
        + weights.recency * recency_boost
        + weights.momentum * (momentum_ratio * 4.0).clamp(0.0, 1.0);

    let trend_label = trend::classify(&TrendInputs {
        recency_days,
        velocity,
        max_velocity: normalizers.max_velocity,
        acceleration,
        decay_score,
    });

    ScoredModel {
        model: model.clone(),
        velocity,
        acceleration,
        recency_days,
        baseline_velocity,
        lift,
        frontier_score,
        momentum_ratio,
        decay_score,
        trend_label,
        series,
    }
}
