pub mod chart_handler;
pub mod trend_handler;

pub use chart_handler::ChartHandler;
pub use trend_handler::TrendHandler;
