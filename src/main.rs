use chartisan::config::Config;
use chartisan::infrastructure::container::AppContainer;
use chartisan::presentation::http::server::HttpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let container = match AppContainer::new(&config).await {
        Ok(container) => container,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize application");
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(
        container.chart_handler,
        container.trend_handler,
        Some(config.port),
    );

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
