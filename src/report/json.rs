use crate::types::report::LeaderboardReport;

pub fn to_json(report: &LeaderboardReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStats;
    use crate::score::score_models;
    use crate::types::config::LeaderboardLimits;
    use crate::types::model::ModelRecord;
    use crate::types::scoring::FrontierWeights;
    use crate::views::rank::build_report;

    #[test]
    fn json_report_uses_hub_field_names() {
        let models = vec![ModelRecord {
            downloads: Some(3000),
            downloads_all_time: Some(12_000),
            pipeline_tag: Some("text-generation".to_string()),
            ..ModelRecord::new("org/model")
        }];
        let scored = score_models(&models, None, &FrontierWeights::default());
        let report = build_report(
            &scored,
            HistoryStats {
                days: 0,
                first_date: None,
                last_date: None,
            },
            &[],
            &LeaderboardLimits::default(),
        );

        let rendered = to_json(&report).expect("json should serialize");
        assert!(rendered.contains("\"id\": \"org/model\""));
        assert!(rendered.contains("\"downloadsAllTime\": 12000"));
        assert!(rendered.contains("\"pipeline_tag\": \"text-generation\""));
        assert!(rendered.contains("\"frontierScore\""));
        assert!(rendered.contains("\"trendLabel\": \"Steady\""));
        assert!(rendered.contains("\"velocity\": 100.0"));
    }
}
