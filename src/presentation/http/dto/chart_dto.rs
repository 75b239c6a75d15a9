use serde::Serialize;
use serde_json::Value;

use crate::application::services::chart_service::ChartResult;

#[derive(Debug, Serialize)]
pub struct ChartDataDto {
    pub x: Vec<Value>,
    pub y: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponseDto {
    pub chart_type: String,
    pub x_axis: String,
    pub y_axis: String,
    pub data: ChartDataDto,
    pub plotly_data: Value,
    pub status: String,
}

impl From<ChartResult> for ChartResponseDto {
    fn from(result: ChartResult) -> Self {
        Self {
            chart_type: result.chart_type,
            x_axis: result.x_axis,
            y_axis: result.y_axis,
            data: ChartDataDto {
                x: result.data.x,
                y: result.data.y,
            },
            plotly_data: result.plotly_data,
            status: result.status,
        }
    }
}
