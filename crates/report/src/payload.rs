//! Lenient parsing of the analysis payload.
//!
//! The payload comes from an external analysis service and is treated as
//! untrusted: every field is type-checked and anything of the wrong shape is
//! skipped rather than failing the export.

use serde_json::Value;

pub const NO_SUMMARY: &str = "No summary available";

/// One chart as delivered by the analysis service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    /// Self-contained chart markup (HTML plus script) in the service's format.
    pub markup: String,
    pub caption: String,
}

/// The normalized inputs of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSource {
    pub summary: String,
    pub insights: Vec<String>,
    pub charts: Vec<ChartSpec>,
}

impl Default for ReportSource {
    fn default() -> Self {
        Self {
            summary: NO_SUMMARY.to_string(),
            insights: Vec::new(),
            charts: Vec::new(),
        }
    }
}

impl ReportSource {
    /// Reads `{ analysis: { summary, insights }, visualizations: { charts, summary, insights } }`.
    ///
    /// The visualization-level summary wins over the analysis-level one, and an
    /// empty or non-string value falls through to the next candidate. Insights
    /// come from the first of the two places holding an array.
    pub fn from_payload(payload: &Value) -> Self {
        let analysis = payload.get("analysis");
        let visualizations = payload.get("visualizations");

        let summary = [visualizations, analysis]
            .into_iter()
            .flatten()
            .filter_map(|section| section.get("summary").and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or(NO_SUMMARY)
            .to_string();

        let insights = [visualizations, analysis]
            .into_iter()
            .flatten()
            .find_map(|section| section.get("insights").and_then(Value::as_array))
            .map(|items| read_insights(items))
            .unwrap_or_default();

        let charts = visualizations
            .and_then(|v| v.get("charts"))
            .and_then(Value::as_array)
            .map(|items| read_charts(items))
            .unwrap_or_default();

        log::debug!(
            "Parsed payload: summary of {} chars, {} insights, {} charts",
            summary.len(),
            insights.len(),
            charts.len()
        );

        Self {
            summary,
            insights,
            charts,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let payload: Value = serde_json::from_str(json)?;
        Ok(Self::from_payload(&payload))
    }
}

fn read_insights(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item.as_str() {
            Some(text) if !text.trim().is_empty() => Some(text.to_string()),
            Some(_) => None,
            None => {
                log::warn!("Ignoring insight {} of type {}", i, json_type(item));
                None
            }
        })
        .collect()
}

fn read_charts(items: &[Value]) -> Vec<ChartSpec> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let Some(chart) = item.as_object() else {
                log::warn!("Ignoring chart {} of type {}", i, json_type(item));
                return None;
            };
            let text = |key: &str| {
                chart
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            Some(ChartSpec {
                markup: text("html"),
                caption: text("description"),
            })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visualization_fields_win() {
        let source = ReportSource::from_payload(&json!({
            "analysis": { "summary": "from analysis", "insights": ["a"] },
            "visualizations": {
                "summary": "from charts",
                "insights": ["b", "c"],
                "charts": []
            }
        }));
        assert_eq!(source.summary, "from charts");
        assert_eq!(source.insights, vec!["b", "c"]);
    }

    #[test]
    fn empty_or_mistyped_summary_falls_through() {
        let source = ReportSource::from_payload(&json!({
            "analysis": { "summary": "fallback" },
            "visualizations": { "summary": "" }
        }));
        assert_eq!(source.summary, "fallback");

        let source = ReportSource::from_payload(&json!({
            "analysis": { "summary": 42 },
            "visualizations": { "summary": ["not", "text"] }
        }));
        assert_eq!(source.summary, NO_SUMMARY);
    }

    #[test]
    fn missing_sections_give_defaults() {
        assert_eq!(ReportSource::from_payload(&json!({})), ReportSource::default());
        assert_eq!(ReportSource::from_payload(&json!(null)), ReportSource::default());
    }

    #[test]
    fn insights_skip_non_strings() {
        let source = ReportSource::from_payload(&json!({
            "analysis": { "insights": ["first", 3, null, "  ", "second", { "x": 1 }] }
        }));
        assert_eq!(source.insights, vec!["first", "second"]);
    }

    #[test]
    fn non_array_insights_fall_through() {
        let source = ReportSource::from_payload(&json!({
            "analysis": { "insights": ["kept"] },
            "visualizations": { "insights": "not a list" }
        }));
        assert_eq!(source.insights, vec!["kept"]);
    }

    #[test]
    fn charts_keep_order_and_tolerate_missing_fields() {
        let source = ReportSource::from_payload(&json!({
            "visualizations": {
                "charts": [
                    { "html": "<div id='a'></div>", "description": "Revenue" },
                    "garbage",
                    { "description": "No markup" },
                    { "html": "<div id='c'></div>", "description": 7 }
                ]
            }
        }));
        assert_eq!(
            source.charts,
            vec![
                ChartSpec {
                    markup: "<div id='a'></div>".into(),
                    caption: "Revenue".into()
                },
                ChartSpec {
                    markup: String::new(),
                    caption: "No markup".into()
                },
                ChartSpec {
                    markup: "<div id='c'></div>".into(),
                    caption: String::new()
                },
            ]
        );
    }

    #[test]
    fn from_json_rejects_invalid_text() {
        assert!(ReportSource::from_json("{ not json").is_err());
        assert_eq!(
            ReportSource::from_json(r#"{"analysis":{"summary":"ok"}}"#).unwrap().summary,
            "ok"
        );
    }
}
