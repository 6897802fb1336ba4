use crate::types::report::{CategoryRollup, LeaderboardReport};
use crate::types::scoring::ScoredModel;

fn history_line(report: &LeaderboardReport) -> String {
    match (&report.history.first_date, &report.history.last_date) {
        (Some(first), Some(last)) => format!(
            "History: {} snapshot(s), {} to {}\n\n",
            report.history.days, first, last
        ),
        _ => "History: none yet (velocity estimated from 30-day downloads)\n\n".to_string(),
    }
}

fn push_models<F>(output: &mut String, title: &str, models: &[ScoredModel], detail: F)
where
    F: Fn(&ScoredModel) -> String,
{
    output.push_str(&format!("## {title}\n\n"));
    if models.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    for model in models {
        output.push_str(&format!("- {} ({})\n", model.id(), detail(model)));
    }
    output.push('\n');
}

fn push_rollups(output: &mut String, title: &str, rows: &[CategoryRollup], precision: usize) {
    output.push_str(&format!("## {title}\n\n"));
    if rows.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    for row in rows {
        output.push_str(&format!(
            "- {}: {:.*} across {} model(s)\n",
            row.label, precision, row.value, row.models
        ));
    }
    output.push('\n');
}

pub fn to_markdown(report: &LeaderboardReport) -> String {
    let mut output = String::new();
    output.push_str("# Frontier Report\n\n");
    output.push_str(&format!("Models scored: {}\n\n", report.model_count));
    output.push_str(&history_line(report));

    output.push_str("## Frontier Leaderboard\n\n");
    if report.frontier.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| # | Model | Score | Velocity/day | Accel | Lift | Trend |\n");
        output.push_str("|---|-------|-------|--------------|-------|------|-------|\n");
        for (rank, model) in report.frontier.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.3} | {:.1} | {:+.2} | {:.2} | {} |\n",
                rank + 1,
                model.id(),
                model.frontier_score,
                model.velocity,
                model.acceleration,
                model.lift,
                model.trend_label
            ));
        }
        output.push('\n');
    }

    push_models(&mut output, "Breakouts", &report.breakouts, |model| {
        format!("acceleration {:+.2}", model.acceleration)
    });
    push_models(&mut output, "New Models", &report.new_models, |model| {
        format!("{:.1}/day, {} day(s) old", model.velocity, model.recency_days)
    });
    push_models(&mut output, "Lift Ladder", &report.lift_ladder, |model| {
        format!("{:.2}x baseline", model.lift)
    });
    push_models(&mut output, "Momentum Share", &report.momentum_share, |model| {
        format!("{:.0}% of lifetime in 30 days", model.momentum_ratio * 100.0)
    });
    if report.has_daily_history() {
        push_models(&mut output, "Cooling", &report.cooling, |model| {
            format!("decay {:+.2}", model.decay_score)
        });
    }
    push_rollups(&mut output, "Category Velocity", &report.category_velocity, 1);
    push_rollups(&mut output, "Category Cooling", &report.category_cooling, 2);

    output
}
