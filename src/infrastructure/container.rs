use std::sync::Arc;

use crate::application::ports::{LanguageModel, VectorStore};
use crate::application::services::{
    ChartConfigResolver, ChartService, TrendService, VectorIndexService,
};
use crate::config::Config;
use crate::infrastructure::external_services::{GeminiClient, GeminiClientConfig, QdrantStore};
use crate::presentation::http::handlers::{ChartHandler, TrendHandler};

/// Composition root: collaborator clients are built once here and shared by
/// reference for the lifetime of the process.
pub struct AppContainer {
    pub chart_handler: Arc<ChartHandler>,
    pub trend_handler: Arc<TrendHandler>,
}

impl AppContainer {
    pub async fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let gemini_config = GeminiClientConfig::new(
            config.gemini_api_key.clone(),
            config.embedding_model.clone(),
        );
        let language_model: Arc<dyn LanguageModel> = Arc::new(GeminiClient::new(gemini_config)?);

        let vector_store: Arc<dyn VectorStore> =
            Arc::new(QdrantStore::new(&config.qdrant_host, config.qdrant_port)?);
        let vector_index = Arc::new(VectorIndexService::new(vector_store));

        // The service cannot run without its collection.
        vector_index
            .ensure_ready()
            .await
            .map_err(|e| format!("failed to prepare vector store collection: {}", e))?;

        let chart_service = Arc::new(ChartService::new(
            ChartConfigResolver::new(language_model.clone()),
            language_model.clone(),
            vector_index,
        ));
        let trend_service = Arc::new(TrendService::new(language_model));

        Ok(Self {
            chart_handler: Arc::new(ChartHandler::new(chart_service)),
            trend_handler: Arc::new(TrendHandler::new(trend_service)),
        })
    }
}
