pub mod chart_config_resolver;
pub mod chart_renderer;
pub mod chart_service;
pub mod trend_service;
pub mod vector_index;

pub use chart_config_resolver::ChartConfigResolver;
pub use chart_service::{ChartService, ChartServiceError, DataType};
pub use trend_service::TrendService;
pub use vector_index::VectorIndexService;
