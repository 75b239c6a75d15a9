use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::services::trend_service::TrendService;
use crate::presentation::http::dto::TrendResponseDto;
use crate::presentation::http::errors::AppError;

pub struct TrendHandler {
    trend_service: Arc<TrendService>,
}

impl TrendHandler {
    pub fn new(trend_service: Arc<TrendService>) -> Self {
        Self { trend_service }
    }

    pub async fn analyze_trends(
        State(handler): State<Arc<TrendHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        let mut query: Option<String> = None;
        let mut file: Option<(String, Vec<u8>)> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "query" => {
                    let text = field.text().await.map_err(|e| {
                        AppError::InvalidInput(format!("Malformed multipart request: {}", e))
                    })?;
                    query = Some(text).filter(|t| !t.is_empty());
                }
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
                        })?
                        .to_vec();
                    file = Some((filename, data));
                }
                _ => {}
            }
        }

        let query = query
            .ok_or_else(|| AppError::InvalidInput("Missing required field: query".to_string()))?;

        let content = match file {
            Some((filename, data)) if filename.ends_with(".csv") => data,
            _ => {
                return Err(AppError::InvalidInput(
                    "CSV file required for trend analysis".to_string(),
                ));
            }
        };

        let result = handler.trend_service.analyze_trends(&query, &content).await?;

        Ok(Json(TrendResponseDto::from(result)))
    }
}
