use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentistream_common::Config;
use sentistream_core::LexiconClassifier;

mod delivery;
mod report;
mod ws;

use delivery::Delivery;
use report::CsvReportBuilder;

pub struct AppState {
    pub config: Config,
    pub delivery: Arc<Delivery>,
    pub classifier: Arc<LexiconClassifier>,
    pub reports: Arc<CsvReportBuilder>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sentistream_api=info".parse()?)
                .add_directive("sentistream_core=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let state = Arc::new(AppState {
        delivery: Arc::new(Delivery::new()),
        classifier: Arc::new(LexiconClassifier::new()),
        reports: Arc::new(CsvReportBuilder::new(config.report_dir.clone())),
        config,
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Streaming sessions
        .route("/ws", get(ws::ws_handler))
        .with_state(state.clone())
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", state.config.web_host, state.config.web_port);
    info!("sentistream API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
