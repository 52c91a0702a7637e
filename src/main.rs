use std::sync::Arc;

use anyhow::Context;
use eduflow_api::config::Config;
use eduflow_api::db::{self, HabitStore, MemoryHabitStore, PgHabitStore};
use eduflow_api::services::clock::SystemClock;
use eduflow_api::{cors_layer, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eduflow_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let habits: Arc<dyn HabitStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .context("Failed to create database pool")?;
            let store = PgHabitStore::new(pool);
            store
                .migrate()
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, habits are kept in memory only");
            Arc::new(MemoryHabitStore::new())
        }
    };

    let state = AppState {
        habits,
        config: config.clone(),
        clock: Arc::new(SystemClock::new(config.day_boundary_offset_minutes)),
    };

    let app = router(state).layer(cors_layer(&config));

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
