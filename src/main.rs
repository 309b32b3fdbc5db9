use std::{error::Error, sync::Arc};

use axum::{http::Method, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use cart_api::ReqwestCartApi;
use config::AppConfig;
use dotenv::dotenv;
use routes::router;
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{event, Level};

mod cart_api;
mod config;
mod cqrs;
mod domain;
mod dtos;
mod errors;
mod routes;
mod sessions;
mod state;
mod widget;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;

    let subscriber = tracing_subscriber::
    fmt()
    .with_max_level(config.log_level)
    .with_target(false)
    .with_ansi(false)
    .json()
    .with_file(true)
    .with_line_number(true)
    .with_current_span(true);

    match &config.log_path {
        Some(path) => subscriber.with_writer(std::fs::File::create(path)?).init(),
        None => subscriber.init(),
    }

    let cart_api = Arc::new(ReqwestCartApi::new(config.cart_api_base_url.clone()));
    let state = Arc::new(AppState::new(cart_api));

    let (prometheus_layer, metrics_handle) = PrometheusMetricLayer::pair();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.axum_port)).await?;
    event!(Level::INFO, "order widget listening on {}, cart service at {}", config.axum_port, config.cart_api_base_url);

    axum::serve(listener, router(state)
        .route("/metrics", get(|| async move {metrics_handle.render()}))

        .layer(prometheus_layer)
        .layer(
            ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::very_permissive().allow_methods([Method::GET, Method::POST, Method::OPTIONS]))
        )).await?;

    Ok(())
}
