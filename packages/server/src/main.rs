use anyhow::Context;
use tracing::{info, warn};

use blog_server::config::{AppConfig, StoreBackend};
use blog_server::repository::Repositories;
use blog_server::state::AppState;
use blog_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let repos = match config.database.backend {
        StoreBackend::Mongo => {
            let db = database::init_db(&config.database)
                .await
                .context("Failed to connect to MongoDB")?;
            database::ensure_indexes(&db).await;
            Repositories::mongo(&db)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Repositories::in_memory()
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        environment = %config.server.environment,
        backend = ?config.database.backend,
        "Starting blog server"
    );

    let app = build_router(AppState::new(config, repos));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server is Running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
