use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::TrendHandler;

pub fn trend_routes(trend_handler: Arc<TrendHandler>) -> Router {
    Router::new()
        .route("/analyze-trends", post(TrendHandler::analyze_trends))
        .with_state(trend_handler)
}
