use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::LanguageModel;
use crate::domain::chart::ChartConfig;

const CHART_PROMPT: &str = "Given a user query '{query}' and available dataset columns {columns}, \
suggest a chart type (line, bar, pie, scatter, heatmap) and the X and Y axis labels. \
Respond in JSON format with the keys: \"chart_type\", \"x\", and \"y\".";

/// Why an inference attempt was discarded in favor of the default config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    Unavailable,
    Unparseable,
    IncompleteKeys,
    InvalidColumnRef,
}

/// Turns a natural-language query plus the dataset's column names into a
/// concrete [`ChartConfig`]. A caller-supplied chart type is honored
/// unconditionally; otherwise the language model is asked once, and any
/// deviation from the expected reply shape falls back to a scatter plot over
/// the first two columns.
pub struct ChartConfigResolver {
    language_model: Arc<dyn LanguageModel>,
}

impl ChartConfigResolver {
    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    /// Resolves a chart configuration. Callers validate the table first, so
    /// `columns` always has at least one entry.
    pub async fn resolve(
        &self,
        query: &str,
        columns: &[String],
        explicit_type: Option<&str>,
    ) -> ChartConfig {
        if let Some(chart_type) = explicit_type {
            return ChartConfig {
                chart_type: chart_type.to_string(),
                x: columns[0].clone(),
                y: columns.get(1).cloned(),
            };
        }

        match self.suggest(query, columns).await {
            Ok(config) => {
                tracing::info!(query, ?config, "language model interpreted query");
                config
            }
            Err(reason) => {
                tracing::warn!(query, ?reason, "falling back to default chart config");
                default_config(columns)
            }
        }
    }

    async fn suggest(&self, query: &str, columns: &[String]) -> Result<ChartConfig, FallbackReason> {
        let prompt = CHART_PROMPT
            .replace("{query}", query)
            .replace("{columns}", &format!("{:?}", columns));

        let reply = self
            .language_model
            .generate_text(&prompt)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "chart inference call failed");
                FallbackReason::Unavailable
            })?;

        parse_suggestion(reply.trim(), columns)
    }
}

/// Strict parse of the model's reply: a JSON object carrying string values
/// for all of `chart_type`, `x` and `y`, with both axes naming existing
/// columns. Anything else is a tagged fallback reason.
fn parse_suggestion(reply: &str, columns: &[String]) -> Result<ChartConfig, FallbackReason> {
    let value: Value = serde_json::from_str(reply).map_err(|_| FallbackReason::Unparseable)?;
    let object = value.as_object().ok_or(FallbackReason::Unparseable)?;

    let chart_type = object
        .get("chart_type")
        .and_then(Value::as_str)
        .ok_or(FallbackReason::IncompleteKeys)?;
    let x = object
        .get("x")
        .and_then(Value::as_str)
        .ok_or(FallbackReason::IncompleteKeys)?;
    let y = object
        .get("y")
        .and_then(Value::as_str)
        .ok_or(FallbackReason::IncompleteKeys)?;

    if !columns.iter().any(|c| c == x) || !columns.iter().any(|c| c == y) {
        return Err(FallbackReason::InvalidColumnRef);
    }

    Ok(ChartConfig {
        chart_type: chart_type.to_string(),
        x: x.to_string(),
        y: Some(y.to_string()),
    })
}

fn default_config(columns: &[String]) -> ChartConfig {
    ChartConfig {
        chart_type: "scatter".to_string(),
        x: columns[0].clone(),
        y: columns.get(1).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::ports::{EmbedRequest, LanguageModelError};

    struct CannedModel {
        reply: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl CannedModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LanguageModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(|_| LanguageModelError::NetworkError("connection refused".to_string()))
        }

        async fn embed_text(
            &self,
            _request: EmbedRequest,
        ) -> Result<Vec<f32>, LanguageModelError> {
            Err(LanguageModelError::ApiError("not used".to_string()))
        }
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_explicit_type_bypasses_inference() {
        let model = Arc::new(CannedModel::replying(
            r#"{"chart_type": "line", "x": "c", "y": "a"}"#,
        ));
        let resolver = ChartConfigResolver::new(model.clone());

        let config = resolver
            .resolve("anything at all", &columns(&["a", "b", "c"]), Some("bar"))
            .await;

        assert_eq!(config.chart_type, "bar");
        assert_eq!(config.x, "a");
        assert_eq!(config.y.as_deref(), Some("b"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_suggestion_is_honored() {
        let model = Arc::new(CannedModel::replying(
            r#"{"chart_type": "bar", "x": "month", "y": "revenue"}"#,
        ));
        let resolver = ChartConfigResolver::new(model);

        let config = resolver
            .resolve("revenue by month", &columns(&["month", "revenue"]), None)
            .await;

        assert_eq!(config.chart_type, "bar");
        assert_eq!(config.x, "month");
        assert_eq!(config.y.as_deref(), Some("revenue"));
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_scatter() {
        let model = Arc::new(CannedModel::replying(r#"{"chart_type": "bar", "x": "a"}"#));
        let resolver = ChartConfigResolver::new(model);

        let config = resolver.resolve("plot", &columns(&["a", "b"]), None).await;

        assert_eq!(config.chart_type, "scatter");
        assert_eq!(config.x, "a");
        assert_eq!(config.y.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_unavailable_model_falls_back_to_scatter() {
        let resolver = ChartConfigResolver::new(Arc::new(CannedModel::failing()));

        let config = resolver.resolve("plot", &columns(&["a", "b"]), None).await;

        assert_eq!(config.chart_type, "scatter");
        assert_eq!(config.x, "a");
        assert_eq!(config.y.as_deref(), Some("b"));
    }

    #[test]
    fn test_parse_suggestion_rejects_non_json() {
        let result = parse_suggestion("a bar chart please", &columns(&["a", "b"]));
        assert_eq!(result, Err(FallbackReason::Unparseable));
    }

    #[test]
    fn test_parse_suggestion_rejects_unknown_column() {
        let result = parse_suggestion(
            r#"{"chart_type": "bar", "x": "a", "y": "missing"}"#,
            &columns(&["a", "b"]),
        );
        assert_eq!(result, Err(FallbackReason::InvalidColumnRef));
    }

    #[test]
    fn test_parse_suggestion_rejects_non_string_axis() {
        let result = parse_suggestion(
            r#"{"chart_type": "bar", "x": "a", "y": 3}"#,
            &columns(&["a", "b"]),
        );
        assert_eq!(result, Err(FallbackReason::IncompleteKeys));
    }
}
