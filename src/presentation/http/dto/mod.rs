pub mod chart_dto;
pub mod response_dto;
pub mod trend_dto;

pub use chart_dto::ChartResponseDto;
pub use response_dto::HealthResponseDto;
pub use trend_dto::TrendResponseDto;
