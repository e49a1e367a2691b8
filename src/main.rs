use augur::sources::YahooSource;
use augur::{app, AnalysisService, AppState, Config};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Augur server on {}:{}", config.host, config.port);
    info!(
        lookback_days = config.fetch.lookback_days,
        max_attempts = config.fetch.max_attempts,
        mock_fallback = config.fetch.mock_fallback,
        "data source settings"
    );

    let source = Arc::new(YahooSource::new(Duration::from_secs(config.fetch.timeout_secs)));
    let analysis = Arc::new(AnalysisService::new(source, &config));

    // Periodically drop expired cached series
    if !config.fetch.cache_ttl().is_zero() {
        let analysis = analysis.clone();
        let every = config.fetch.cache_ttl();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(every).await;
                analysis.purge_cache();
            }
        });
    }

    let state = AppState {
        config: config.clone(),
        analysis,
    };

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
