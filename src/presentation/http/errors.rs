use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::services::chart_service::ChartServiceError;
use crate::application::services::trend_service::TrendServiceError;

/// Client-visible error categories. Input and rendering problems map to 400
/// with a plain message; anything unclassified becomes a 500 whose detail is
/// also logged server-side.
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    UnsupportedChartType(String),
    RenderFailed(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(message) => bad_request(message),
            AppError::UnsupportedChartType(chart_type) => {
                bad_request(format!("Unsupported chart type: {}", chart_type))
            }
            AppError::RenderFailed(message) => bad_request(message),
            AppError::Internal(detail) => {
                tracing::error!("unhandled error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "message": "Internal Server Error",
                        "detail": detail,
                    })),
                )
                    .into_response()
            }
        }
    }
}

fn bad_request(message: String) -> Response {
    tracing::warn!("rejected request: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

impl From<ChartServiceError> for AppError {
    fn from(error: ChartServiceError) -> Self {
        match error {
            ChartServiceError::InvalidInput(msg) => AppError::InvalidInput(msg),
            ChartServiceError::UnsupportedChartType(chart_type) => {
                AppError::UnsupportedChartType(chart_type)
            }
            ChartServiceError::RenderFailed(msg) => AppError::RenderFailed(msg),
        }
    }
}

impl From<TrendServiceError> for AppError {
    fn from(error: TrendServiceError) -> Self {
        match error {
            TrendServiceError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}
