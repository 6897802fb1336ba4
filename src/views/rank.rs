use crate::history::HistoryStats;
use crate::score::signals::average;
use crate::types::config::LeaderboardLimits;
use crate::types::model::Tag;
use crate::types::report::{CategoryRollup, LeaderboardReport};
use crate::types::scoring::ScoredModel;
use crate::views::categories::{category_for_pipeline_tag, Category};
use chrono::Utc;
use std::collections::BTreeMap;

const CATEGORY_VELOCITY_LIMIT: usize = 8;

fn ranked<F, K>(
    scored: &[ScoredModel],
    keep: F,
    key: K,
    descending: bool,
    limit: usize,
) -> Vec<ScoredModel>
where
    F: Fn(&ScoredModel) -> bool,
    K: Fn(&ScoredModel) -> f64,
{
    let mut selected = scored
        .iter()
        .filter(|model| keep(*model))
        .cloned()
        .collect::<Vec<_>>();
    selected.sort_by(|a, b| {
        let ordering = key(a).total_cmp(&key(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    selected.truncate(limit);
    selected
}

pub fn frontier_leaders(scored: &[ScoredModel], limit: usize) -> Vec<ScoredModel> {
    ranked(scored, |_| true, |model| model.frontier_score, true, limit)
}

pub fn breakouts(scored: &[ScoredModel], limit: usize) -> Vec<ScoredModel> {
    ranked(
        scored,
        |model| model.acceleration > 0.0,
        |model| model.acceleration,
        true,
        limit,
    )
}

pub fn new_models(scored: &[ScoredModel], within_days: i64, limit: usize) -> Vec<ScoredModel> {
    ranked(
        scored,
        |model| model.recency_days <= within_days,
        |model| model.velocity,
        true,
        limit,
    )
}

pub fn lift_ladder(scored: &[ScoredModel], limit: usize) -> Vec<ScoredModel> {
    ranked(scored, |model| model.lift > 0.0, |model| model.lift, true, limit)
}

pub fn momentum_share(scored: &[ScoredModel], limit: usize) -> Vec<ScoredModel> {
    ranked(
        scored,
        |model| model.model.downloads_all_time.unwrap_or(0) > 0,
        |model| model.momentum_ratio,
        true,
        limit,
    )
}

pub fn cooling_ladder(scored: &[ScoredModel], limit: usize) -> Vec<ScoredModel> {
    ranked(scored, |_| true, |model| model.decay_score, false, limit)
}

fn by_category<'a>(
    scored: &'a [ScoredModel],
    known: &[Tag],
) -> BTreeMap<Category, Vec<&'a ScoredModel>> {
    let mut grouped: BTreeMap<Category, Vec<&ScoredModel>> = BTreeMap::new();
    for model in scored {
        if let Some(pipeline_tag) = model.model.pipeline_tag.as_deref() {
            grouped
                .entry(category_for_pipeline_tag(pipeline_tag, known))
                .or_default()
                .push(model);
        }
    }
    grouped
}

pub fn category_velocity(scored: &[ScoredModel], known: &[Tag]) -> Vec<CategoryRollup> {
    let mut rows = by_category(scored, known)
        .into_iter()
        .map(|(category, models)| CategoryRollup {
            id: category.id(),
            label: category.label(),
            value: models.iter().map(|model| model.velocity).sum(),
            models: models.len(),
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows.truncate(CATEGORY_VELOCITY_LIMIT);
    rows
}

pub fn category_cooling(scored: &[ScoredModel], known: &[Tag]) -> Vec<CategoryRollup> {
    let mut rows = by_category(scored, known)
        .into_iter()
        .filter_map(|(category, models)| {
            let decays = models
                .iter()
                .filter(|model| !model.series.is_empty())
                .map(|model| model.decay_score)
                .collect::<Vec<_>>();
            if decays.is_empty() {
                return None;
            }
            Some(CategoryRollup {
                id: category.id(),
                label: category.label(),
                value: average(&decays),
                models: decays.len(),
            })
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| a.value.total_cmp(&b.value));
    rows
}

pub fn build_report(
    scored: &[ScoredModel],
    history: HistoryStats,
    known_tags: &[Tag],
    limits: &LeaderboardLimits,
) -> LeaderboardReport {
    LeaderboardReport {
        generated_at: Utc::now().to_rfc3339(),
        history,
        model_count: scored.len(),
        frontier: frontier_leaders(scored, limits.limit),
        breakouts: breakouts(scored, limits.highlight_limit),
        new_models: new_models(scored, limits.new_within_days, limits.highlight_limit),
        lift_ladder: lift_ladder(scored, limits.highlight_limit),
        momentum_share: momentum_share(scored, limits.highlight_limit),
        cooling: cooling_ladder(scored, limits.highlight_limit),
        category_velocity: category_velocity(scored, known_tags),
        category_cooling: category_cooling(scored, known_tags),
    }
}
