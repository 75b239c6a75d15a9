use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ChartHandler;

pub fn chart_routes(chart_handler: Arc<ChartHandler>) -> Router {
    Router::new()
        .route("/generate-chart", post(ChartHandler::generate_chart))
        .with_state(chart_handler)
}
