//! Climate Observation API Server
//!
//! Read-only REST API over the precipitation and temperature observations
//! of the `measurement` and `station` tables.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod config;
mod error;
pub mod routes;
mod window;

pub use config::{ApiConfig, CutoffPolicy};
pub use error::ApiError;
pub use window::DateWindow;

use climate_storage::Repository;

/// Application state shared across handlers
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Cutoff dates for the tobs and temperature routes
    pub window: DateWindow,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Repository, window: DateWindow) -> Self {
        Self { repository, window }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index::list_routes))
        .route("/api/v1.0/precipitation", get(routes::observations::get_precipitation))
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::observations::get_tobs))
        .route("/api/v1.0/:start", get(routes::temps::get_temps_from))
        .route("/api/v1.0/:start/:end", get(routes::temps::get_temps_between))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Serve Prometheus metrics on their own listener
fn install_metrics_exporter(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = addr.parse()?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Serving metrics on {}", addr);
    Ok(())
}

/// Run the server
pub async fn run_server(config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let repository = Repository::connect(&config.database_url, config.max_connections).await?;
    let window = DateWindow::resolve(config, &repository).await?;

    if let Some(addr) = &config.metrics_address {
        install_metrics_exporter(addr)?;
    }

    let state = Arc::new(AppState::new(repository, window));
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
