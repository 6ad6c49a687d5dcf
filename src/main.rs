use std::sync::Arc;

use shrec_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgRatingStore, RatingStore},
    services::RecommendationEngine,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shrec_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    if config.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let store: Arc<dyn RatingStore> = Arc::new(PgRatingStore::new(pool));
    let engine = RecommendationEngine::new(config.no_signal_policy, config.max_rating);
    tracing::info!(
        max_rating = config.max_rating,
        no_signal_policy = ?config.no_signal_policy,
        "Recommendation engine configured"
    );

    let app = create_router(AppState::new(store, engine));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
