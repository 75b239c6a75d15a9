use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::LanguageModel;
use crate::domain::table::Table;

const TREND_PROMPT: &str = "Given a user query '{query}' and a dataset with columns {columns}, \
analyze the data and provide insights or trends.";

const TREND_FALLBACK: &str = "Unable to analyze trends at this time.";

#[derive(Debug)]
pub enum TrendServiceError {
    InvalidInput(String),
}

impl std::fmt::Display for TrendServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendServiceError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TrendServiceError {}

#[derive(Debug, Serialize)]
pub struct TrendResult {
    pub insights: String,
    pub status: String,
}

/// Free-text trend summaries over an uploaded CSV. The language-model call
/// never fails the request; any error yields a fixed fallback message.
pub struct TrendService {
    language_model: Arc<dyn LanguageModel>,
}

impl TrendService {
    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    pub async fn analyze_trends(
        &self,
        query: &str,
        content: &[u8],
    ) -> Result<TrendResult, TrendServiceError> {
        let table = Table::from_csv(content).map_err(|e| {
            TrendServiceError::InvalidInput(format!("Error processing CSV data: {}", e))
        })?;

        table
            .validate()
            .map_err(|e| TrendServiceError::InvalidInput(e.to_string()))?;

        let insights = self.analyze(query, &table).await;

        Ok(TrendResult {
            insights,
            status: "success".to_string(),
        })
    }

    async fn analyze(&self, query: &str, table: &Table) -> String {
        let prompt = TREND_PROMPT
            .replace("{query}", query)
            .replace("{columns}", &format!("{:?}", table.columns()));

        match self.language_model.generate_text(&prompt).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "trend analysis call failed");
                TREND_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::{EmbedRequest, LanguageModelError};

    struct CannedModel(Option<String>);

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LanguageModelError> {
            self.0
                .clone()
                .ok_or_else(|| LanguageModelError::NetworkError("unreachable".to_string()))
        }

        async fn embed_text(&self, _request: EmbedRequest) -> Result<Vec<f32>, LanguageModelError> {
            Err(LanguageModelError::ApiError("not used".to_string()))
        }
    }

    #[tokio::test]
    async fn test_insights_are_trimmed() {
        let service = TrendService::new(Arc::new(CannedModel(Some(
            "  Sales rise steadily through Q3.  \n".to_string(),
        ))));

        let result = service
            .analyze_trends("how are sales", b"month,sales\njan,10\nfeb,20")
            .await
            .unwrap();

        assert_eq!(result.status, "success");
        assert_eq!(result.insights, "Sales rise steadily through Q3.");
    }

    #[tokio::test]
    async fn test_model_failure_returns_fixed_fallback() {
        let service = TrendService::new(Arc::new(CannedModel(None)));

        let result = service
            .analyze_trends("how are sales", b"month,sales\njan,10")
            .await
            .unwrap();

        assert_eq!(result.insights, "Unable to analyze trends at this time.");
        assert_eq!(result.status, "success");
    }

    #[tokio::test]
    async fn test_invalid_dataset_is_rejected() {
        let service = TrendService::new(Arc::new(CannedModel(None)));

        let result = service.analyze_trends("trends", b"only_column\n1\n2").await;

        assert!(matches!(
            result,
            Err(TrendServiceError::InvalidInput(msg))
                if msg == "Dataset must have at least 2 columns."
        ));
    }
}
