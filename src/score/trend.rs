use crate::types::scoring::TrendLabel;

const NEW_MAX_RECENCY_DAYS: i64 = 5;
const NEW_VELOCITY_SHARE: f64 = 6.0;
const BREAKOUT_MIN_ACCELERATION: f64 = 0.2;
const BREAKOUT_VELOCITY_SHARE: f64 = 8.0;
const COOLING_MAX_DECAY: f64 = -0.15;

#[derive(Debug, Clone, Copy)]
pub struct TrendInputs {
    pub recency_days: i64,
    pub velocity: f64,
    pub max_velocity: f64,
    pub acceleration: f64,
    pub decay_score: f64,
}

type Rule = fn(&TrendInputs) -> bool;

/// Highest priority first. The first matching rule picks the label.
const RULES: [(TrendLabel, Rule); 3] = [
    (TrendLabel::Cooling, is_cooling),
    (TrendLabel::Breakout, is_breakout),
    (TrendLabel::New, is_new),
];

fn is_cooling(inputs: &TrendInputs) -> bool {
    inputs.decay_score < COOLING_MAX_DECAY
}

fn is_breakout(inputs: &TrendInputs) -> bool {
    inputs.acceleration > BREAKOUT_MIN_ACCELERATION
        && inputs.velocity > inputs.max_velocity / BREAKOUT_VELOCITY_SHARE
}

fn is_new(inputs: &TrendInputs) -> bool {
    inputs.recency_days <= NEW_MAX_RECENCY_DAYS
        && inputs.velocity > inputs.max_velocity / NEW_VELOCITY_SHARE
}

pub fn classify(inputs: &TrendInputs) -> TrendLabel {
    RULES
        .iter()
        .find(|(_, applies)| applies(inputs))
        .map(|(label, _)| *label)
        .unwrap_or(TrendLabel::Steady)
}
