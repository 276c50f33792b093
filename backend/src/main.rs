use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeclock_backend::{
    config::{mask_database_url, Config},
    db::connection::{create_pool, run_migrations},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeclock_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config
            .database_url
            .as_deref()
            .map(mask_database_url)
            .unwrap_or_else(|| "<in-memory>".into()),
        time_zone = %config.time_zone,
        bind_addr = %config.bind_addr,
        cors_allow_origins = ?config.cors_allow_origins,
        "Loaded configuration from environment/.env"
    );

    // Select storage backend
    let state = match config.database_url.clone() {
        Some(url) => {
            let pool = create_pool(&url, config.db_max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using PostgreSQL storage");
            AppState::postgres(config, pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; attendance data is kept in memory only");
            AppState::in_memory(config)
        }
    };

    let addr = state.config.bind_addr;
    let app = routes::app(state);

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
