use serde::Serialize;

use crate::application::services::trend_service::TrendResult;

#[derive(Debug, Serialize)]
pub struct TrendResponseDto {
    pub insights: String,
    pub status: String,
}

impl From<TrendResult> for TrendResponseDto {
    fn from(result: TrendResult) -> Self {
        Self {
            insights: result.insights,
            status: result.status,
        }
    }
}
