mod app_state;
mod config;
mod db;
mod models;
mod routes;
mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use app_state::AppState;
use config::AppConfig;
use services::valuation::{ValuationConfig, ValuationPipeline};
use services::vision::GeminiVisionClient;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing ecothrift server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_histogram!(
        "vision_analysis_seconds",
        "Time spent waiting on the vision service per submission"
    );
    metrics::describe_counter!(
        "listing_submissions_total",
        "Total listing submissions received"
    );
    metrics::describe_counter!(
        "listings_created_total",
        "Total listings persisted after passing the sellability gate"
    );
    metrics::describe_counter!(
        "listings_rejected_not_sellable_total",
        "Total submissions routed to recycling/upcycling guidance"
    );

    // Initialize database connection pool
    tracing::info!("Connecting to PostgreSQL database");
    let db_pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run database migrations
    tracing::info!("Running database migrations");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Initialize the vision client and valuation pipeline
    tracing::info!(model = %config.gemini_model, "Initializing vision client");
    let vision = GeminiVisionClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        Duration::from_secs(config.vision_timeout_secs),
    )
    .expect("Failed to initialize vision client");

    let pipeline = ValuationPipeline::new(Arc::new(vision), ValuationConfig::default());

    // Create shared application state
    let state = AppState::new(db_pool, pipeline);

    // Build API routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/v1/items",
            get(routes::listings::list_items).post(routes::listings::submit_listing),
        )
        .route(
            "/api/v1/items/valuate",
            post(routes::listings::valuate_listing),
        )
        .route("/api/v1/items/{id}", get(routes::listings::get_item))
        .route(
            "/api/v1/profile/{id}",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .with_state(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024)); // 10 MB limit

    tracing::info!("Starting ecothrift on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
