use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::services::chart_service::{ChartService, DataType};
use crate::presentation::http::dto::ChartResponseDto;
use crate::presentation::http::errors::AppError;

#[derive(Default)]
struct ChartForm {
    query: Option<String>,
    chart_type: Option<String>,
    file: Option<(String, Vec<u8>)>,
    json_data: Option<String>,
    manual_data: Option<String>,
}

pub struct ChartHandler {
    chart_service: Arc<ChartService>,
}

impl ChartHandler {
    pub fn new(chart_service: Arc<ChartService>) -> Self {
        Self { chart_service }
    }

    pub async fn generate_chart(
        State(handler): State<Arc<ChartHandler>>,
        multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        let form = read_form(multipart).await?;

        let query = form
            .query
            .ok_or_else(|| AppError::InvalidInput("Missing required field: query".to_string()))?;

        // Upload takes precedence over inline JSON, which takes precedence
        // over inline CSV text.
        let (content, data_type, filename) = if let Some((filename, data)) = form.file {
            if !(filename.ends_with(".csv") || filename.ends_with(".json")) {
                return Err(AppError::InvalidInput(
                    "Only CSV and JSON files are supported".to_string(),
                ));
            }
            (data, DataType::File, Some(filename))
        } else if let Some(json_data) = form.json_data {
            (json_data.into_bytes(), DataType::Json, None)
        } else if let Some(manual_data) = form.manual_data {
            (manual_data.into_bytes(), DataType::Manual, None)
        } else {
            return Err(AppError::InvalidInput("No data provided".to_string()));
        };

        let result = handler
            .chart_service
            .generate_chart(
                &query,
                &content,
                form.chart_type.as_deref(),
                data_type,
                filename.as_deref(),
            )
            .await?;

        Ok(Json(ChartResponseDto::from(result)))
    }
}

async fn read_form(mut multipart: Multipart) -> Result<ChartForm, AppError> {
    let mut form = ChartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "query" => form.query = read_text(field).await?,
            "chart_type" => form.chart_type = read_text(field).await?,
            "json_data" => form.json_data = read_text(field).await?,
            "manual_data" => form.manual_data = read_text(field).await?,
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
                    })?
                    .to_vec();
                form.file = Some((filename, data));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Empty form values count as absent, matching the behavior of optional
/// form fields that browsers submit as empty strings.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, AppError> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?;

    Ok(Some(text).filter(|t| !t.is_empty()))
}
