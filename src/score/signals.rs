use chrono::{DateTime, Utc};

/// Days assumed when a model carries no timestamp at all.
pub const UNKNOWN_AGE_DAYS: i64 = 999;
pub const RECENCY_HORIZON_DAYS: i64 = 60;
pub const DOWNLOAD_WINDOW_DAYS: f64 = 30.0;

const VELOCITY_POINTS: usize = 7;
const ACCELERATION_POINTS: usize = 3;
const DECAY_MIN_POINTS: usize = 4;
const ACCELERATION_BASELINE: f64 = 0.05;

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn velocity_from_series(series: &[f64]) -> f64 {
    let window = series.len().min(VELOCITY_POINTS);
    average(&series[series.len() - window..]).max(0.0)
}

pub fn velocity_fallback(window_downloads: Option<u64>) -> f64 {
    window_downloads.unwrap_or(0) as f64 / DOWNLOAD_WINDOW_DAYS
}

pub fn velocity(series: &[f64], window_downloads: Option<u64>) -> f64 {
    if series.is_empty() {
        velocity_fallback(window_downloads)
    } else {
        velocity_from_series(series)
    }
}

pub fn acceleration_from_series(series: &[f64]) -> Option<f64> {
    if series.len() < ACCELERATION_POINTS * 2 {
        return None;
    }
    let end = series.len();
    let recent = average(&series[end - ACCELERATION_POINTS..]);
    let previous = average(&series[end - ACCELERATION_POINTS * 2..end - ACCELERATION_POINTS]);
    Some(((recent - previous) / previous.max(1.0)).clamp(-1.0, 1.0))
}

pub fn acceleration_fallback(trending_score: Option<f64>, window_downloads: Option<u64>) -> f64 {
    let downloads = window_downloads.unwrap_or(0).max(1) as f64;
    (trending_score.unwrap_or(0.0) / downloads - ACCELERATION_BASELINE).clamp(-1.0, 1.0)
}

pub fn acceleration(
    series: &[f64],
    trending_score: Option<f64>,
    window_downloads: Option<u64>,
) -> f64 {
    acceleration_from_series(series)
        .unwrap_or_else(|| acceleration_fallback(trending_score, window_downloads))
}

pub fn decay_score(series: &[f64]) -> f64 {
    if series.len() < DECAY_MIN_POINTS {
        return 0.0;
    }
    let (first, second) = series.split_at(series.len() / 2);
    let first = average(first);
    let second = average(second);
    ((second - first) / first.max(1.0)).clamp(-1.0, 1.0)
}

pub fn days_since(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match timestamp {
        Some(timestamp) => now.signed_duration_since(timestamp).num_days().max(0),
        None => UNKNOWN_AGE_DAYS,
    }
}

pub fn age_days(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    days_since(timestamp, now).max(1)
}

pub fn recency_days(age_days: i64) -> i64 {
    age_days.clamp(0, RECENCY_HORIZON_DAYS)
}

pub fn recency_boost(recency_days: i64) -> f64 {
    1.0 - recency_days as f64 / RECENCY_HORIZON_DAYS as f64
}

pub fn momentum_ratio(velocity: f64, all_time_downloads: Option<u64>) -> f64 {
    match all_time_downloads {
        Some(total) if total > 0 => (velocity * DOWNLOAD_WINDOW_DAYS / total as f64).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

pub fn baseline_velocity(all_time_downloads: Option<u64>, age_days: i64) -> f64 {
    match all_time_downloads {
        Some(total) if total > 0 => total as f64 / age_days.max(1) as f64,
        _ => 0.0,
    }
}

pub fn lift(velocity: f64, baseline_velocity: f64) -> f64 {
    if baseline_velocity > 0.0 {
        velocity / baseline_velocity
    } else {
        0.0
    }
}
