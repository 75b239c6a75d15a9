pub mod chart_routes;
pub mod health_routes;
pub mod trend_routes;

pub use chart_routes::chart_routes;
pub use health_routes::health_routes;
pub use trend_routes::trend_routes;
