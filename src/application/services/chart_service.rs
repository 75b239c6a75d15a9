use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{EmbedRequest, LanguageModel};
use crate::application::services::chart_config_resolver::ChartConfigResolver;
use crate::application::services::chart_renderer::{self, RenderError};
use crate::application::services::vector_index::VectorIndexService;
use crate::domain::table::Table;

const EMBEDDING_TASK_TYPE: &str = "RETRIEVAL_QUERY";
const EMBEDDING_TITLE: &str = "Embedding for Chart Data";

/// How the request supplied its tabular data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Uploaded file: parsed as CSV first, JSON array of objects second.
    File,
    /// Inline JSON array of objects.
    Json,
    /// Inline CSV text.
    Manual,
}

#[derive(Debug)]
pub enum ChartServiceError {
    InvalidInput(String),
    UnsupportedChartType(String),
    RenderFailed(String),
}

impl std::fmt::Display for ChartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartServiceError::InvalidInput(msg) => write!(f, "{}", msg),
            ChartServiceError::UnsupportedChartType(chart_type) => {
                write!(f, "Unsupported chart type: {}", chart_type)
            }
            ChartServiceError::RenderFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ChartServiceError {}

#[derive(Debug, Serialize)]
pub struct ChartData {
    pub x: Vec<Value>,
    pub y: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChartResult {
    pub chart_type: String,
    pub x_axis: String,
    pub y_axis: String,
    pub data: ChartData,
    pub plotly_data: Value,
    pub status: String,
}

/// The generate-chart pipeline: parse, validate, sanitize, resolve the chart
/// configuration, render, then best-effort embed and persist. Embedding and
/// persistence failures degrade gracefully; the chart itself cannot.
pub struct ChartService {
    resolver: ChartConfigResolver,
    language_model: Arc<dyn LanguageModel>,
    vector_index: Arc<VectorIndexService>,
}

impl ChartService {
    pub fn new(
        resolver: ChartConfigResolver,
        language_model: Arc<dyn LanguageModel>,
        vector_index: Arc<VectorIndexService>,
    ) -> Self {
        Self {
            resolver,
            language_model,
            vector_index,
        }
    }

    pub async fn generate_chart(
        &self,
        query: &str,
        content: &[u8],
        explicit_type: Option<&str>,
        data_type: DataType,
        filename: Option<&str>,
    ) -> Result<ChartResult, ChartServiceError> {
        let mut table = parse_table(content, data_type)?;

        table
            .validate()
            .map_err(|e| ChartServiceError::InvalidInput(e.to_string()))?;
        table.sanitize_columns();

        let config = self
            .resolver
            .resolve(query, table.columns(), explicit_type)
            .await;

        let x_axis = config.x.clone();
        let y_axis = match &config.y {
            Some(y) if table.has_column(y) && table.has_column(&x_axis) => y.clone(),
            other => {
                return Err(ChartServiceError::InvalidInput(format!(
                    "Columns '{}' or '{}' not found in dataset",
                    x_axis,
                    other.as_deref().unwrap_or("None")
                )));
            }
        };

        let figure = chart_renderer::render(&config.chart_type, &table, &x_axis, &y_axis)
            .map_err(|e| match e {
                RenderError::UnsupportedType(chart_type) => {
                    ChartServiceError::UnsupportedChartType(chart_type)
                }
                RenderError::Failed(_) => {
                    ChartServiceError::RenderFailed("Failed to generate chart.".to_string())
                }
            })?;

        let description = format!(
            "{} {} chart type {} x axis {} y axis {}",
            query,
            table.to_text(),
            config.chart_type,
            x_axis,
            y_axis
        );

        if let Some(vector) = self.embed_description(&description).await {
            if let Err(e) = self.vector_index.save_rows(&table, &vector, filename).await {
                tracing::warn!(error = %e, "failed to save embeddings, continuing");
            }
        }

        tracing::info!(chart_type = %config.chart_type, query, "generated chart");

        Ok(ChartResult {
            data: ChartData {
                x: table.column_values(&x_axis).unwrap_or_default(),
                y: table.column_values(&y_axis).unwrap_or_default(),
            },
            chart_type: config.chart_type,
            x_axis,
            y_axis,
            plotly_data: figure,
            status: "success".to_string(),
        })
    }

    /// Best-effort embedding: any collaborator failure is logged and mapped
    /// to `None`, never surfaced.
    async fn embed_description(&self, text: &str) -> Option<Vec<f32>> {
        let request = EmbedRequest {
            text: text.to_string(),
            task_type: EMBEDDING_TASK_TYPE.to_string(),
            title: Some(EMBEDDING_TITLE.to_string()),
        };

        match self.language_model.embed_text(request).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::error!(error = %e, "failed to generate embedding");
                None
            }
        }
    }
}

fn parse_table(content: &[u8], data_type: DataType) -> Result<Table, ChartServiceError> {
    match data_type {
        DataType::Json => Table::from_json(content)
            .map_err(|e| ChartServiceError::InvalidInput(format!("Invalid JSON data: {}", e))),
        DataType::File => Table::from_csv(content).or_else(|_| {
            Table::from_json(content).map_err(|e| {
                ChartServiceError::InvalidInput(format!(
                    "Error processing file content as CSV or JSON: {}",
                    e
                ))
            })
        }),
        DataType::Manual => Table::from_csv(content).map_err(|e| {
            ChartServiceError::InvalidInput(format!("Error processing manual CSV data: {}", e))
        }),
    }
}
