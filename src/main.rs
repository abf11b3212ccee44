use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::time::interval;
use tracing_subscriber::EnvFilter;

use poster_oven::{
    app::{
        api::{AppContext, create_api_router},
        state::AppState,
    },
    config::Config,
    utils::rate_limiter::RateLimiter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("poster_oven=info,tower_http=info")),
        )
        .init();

    tracing::info!("Starting PosterOven");

    let config = Config::from_env()?;
    let state = AppState::new(&config)?;
    let rate_limiter = RateLimiter::new(config.server.rate_limit_per_second);

    let sweeper = state.sessions.clone();
    let stale_clients = rate_limiter.clone();
    let cleanup_every = Duration::from_secs(config.session.cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = interval(cleanup_every);

        loop {
            interval.tick().await;
            match sweeper.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Purged {} expired sessions", removed),
                Err(e) => tracing::warn!(error = %e, "Session cleanup failed"),
            }

            let dropped = stale_clients.purge_stale();
            if dropped > 0 {
                tracing::debug!("Dropped {} stale rate limit windows", dropped);
            }
        }
    });

    let context = AppContext {
        state,
        config: config.clone(),
        rate_limiter,
    };

    let app: Router = create_api_router(context);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("PosterOven running on http://{}", addr);
    tracing::info!("Backend: {}", config.backend.base_url);
    tracing::info!("Session TTL: {}s", config.session.ttl_secs);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
