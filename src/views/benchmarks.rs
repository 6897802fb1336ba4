use crate::types::model::ModelDetail;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_HIGHLIGHT_LIMIT: usize = 8;

const LOWER_IS_BETTER: [&str; 5] = ["loss", "perplexity", "wer", "cer", "error"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkEntry {
    pub model_id: String,
    pub task: Option<String>,
    pub dataset: Option<String>,
    pub metric: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkHighlight {
    #[serde(flatten)]
    pub entry: BenchmarkEntry,
    /// Value oriented so that larger is always better.
    pub score: f64,
}

pub fn is_higher_better(metric: Option<&str>) -> bool {
    match metric {
        Some(name) => {
            let name = name.to_lowercase();
            !LOWER_IS_BETTER.iter().any(|key| name.contains(key))
        }
        None => true,
    }
}

fn first_string(value: Option<&Value>, keys: &[&str]) -> Option<String> {
    let value = value?;
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn extract_benchmarks(detail: &ModelDetail) -> Vec<BenchmarkEntry> {
    let mut entries = Vec::new();
    for item in array(detail.model_index.as_ref()) {
        for result in array(item.get("results")) {
            let dataset = first_string(result.get("dataset"), &["name", "type", "config"]);
            let task = first_string(result.get("task"), &["type", "name"]);
            for metric in array(result.get("metrics")) {
                let Some(value) = metric.get("value").and_then(as_number) else {
                    continue;
                };
                entries.push(BenchmarkEntry {
                    model_id: detail.record.id.clone(),
                    task: task.clone(),
                    dataset: dataset.clone(),
                    metric: first_string(Some(metric), &["name", "type"]),
                    value,
                });
            }
        }
    }
    entries
}

pub fn select_benchmark_highlights(
    entries: &[BenchmarkEntry],
    limit: usize,
) -> Vec<BenchmarkHighlight> {
    let mut scored = entries
        .iter()
        .map(|entry| BenchmarkHighlight {
            score: if is_higher_better(entry.metric.as_deref()) {
                entry.value
            } else {
                -entry.value
            },
            entry: entry.clone(),
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::model::ModelRecord;
    use serde_json::json;

    fn detail(model_index: Value) -> ModelDetail {
        ModelDetail {
            record: ModelRecord::new("org/model"),
            model_index: Some(model_index),
            ..ModelDetail::default()
        }
    }

    fn entry(metric: &str, value: f64) -> BenchmarkEntry {
        BenchmarkEntry {
            model_id: "m".to_string(),
            task: None,
            dataset: None,
            metric: Some(metric.to_string()),
            value,
        }
    }

    #[test]
    fn extracts_rows_with_fallback_names() {
        let detail = detail(json!([
            {
                "name": "org/model",
                "results": [
                    {
                        "task": {"type": "text-generation"},
                        "dataset": {"type": "mmlu", "config": "all"},
                        "metrics": [
                            {"type": "accuracy", "value": 71.2},
                            {"name": "perplexity", "value": "5.4"},
                            {"name": "no value"}
                        ]
                    },
                    {"task": {"name": "QA"}, "metrics": "not-an-array"}
                ]
            },
            {"results": null},
            "garbage"
        ]));

        let rows = extract_benchmarks(&detail);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model_id, "org/model");
        assert_eq!(rows[0].task.as_deref(), Some("text-generation"));
        assert_eq!(rows[0].dataset.as_deref(), Some("mmlu"));
        assert_eq!(rows[0].metric.as_deref(), Some("accuracy"));
        assert_eq!(rows[1].value, 5.4);
    }

    #[test]
    fn missing_model_index_yields_no_rows() {
        assert!(extract_benchmarks(&ModelDetail::default()).is_empty());
        assert!(extract_benchmarks(&detail(json!({"results": []}))).is_empty());
    }

    #[test]
    fn direction_inverts_lower_is_better_metrics() {
        assert!(is_higher_better(Some("Accuracy")));
        assert!(is_higher_better(None));
        assert!(!is_higher_better(Some("Eval Loss")));
        assert!(!is_higher_better(Some("WER")));
        assert!(!is_higher_better(Some("error_rate")));
    }

    #[test]
    fn highlights_rank_by_directional_score() {
        let entries = vec![
            entry("accuracy", 0.9),
            entry("wer", 0.1),
            entry("f1", 0.95),
            entry("loss", 2.5),
        ];
        let highlights = select_benchmark_highlights(&entries, 3);
        let metrics = highlights
            .iter()
            .map(|highlight| highlight.entry.metric.as_deref().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(metrics, vec!["f1", "accuracy", "wer"]);
        assert_eq!(highlights[2].score, -0.1);
    }
}
