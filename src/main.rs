//! Seasons API server - composition root.

use std::error::Error;
use std::sync::Arc;

use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use seasons::adapters::{http::api_router, memory, postgres};
use seasons::application::{ReferenceData, Services};
use seasons::config::{AppConfig, LogFormat, LoggingConfig, ServerConfig, StorageBackend};
use seasons::ports::Repositories;

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let builder = tracing_subscriber::fmt().with_env_filter(logging.env_filter()?);
    let installed = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| e as Box<dyn Error>)
}

async fn connect(config: &AppConfig) -> Result<Repositories, Box<dyn Error>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Ok(memory::repositories()?)
        }
        StorageBackend::Postgres => {
            let db = &config.database;
            let pool = PgPoolOptions::new()
                .min_connections(db.min_connections)
                .max_connections(db.max_connections)
                .acquire_timeout(db.acquire_timeout())
                .connect(&db.url)
                .await?;
            if db.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("database migrations applied");
            }
            Ok(postgres::repositories(pool)?)
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let repos = connect(&config).await?;
    let services = Services::new(&repos);

    // Readiness check only; handlers read through the repositories.
    ReferenceData::prefetch(&services.focus, repos.exercises.as_ref()).await?;

    let app = api_router(&services, Arc::clone(&repos.exercises))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?config.storage.backend, "seasons API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
