//! HTTP surface: routes, shared state and server startup.

use std::num::NonZeroU16;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use url::Url;

mod assistant;
mod drawings;
mod prelude;
mod upload;

use crate::config::AppConfig;
use crate::constants::{MAX_UPLOAD_BYTES, MEDIA_ROUTE};
use crate::provider::{ProviderClient, http_client};
use crate::storage::DrawingStore;
use prelude::*;

/// Provider handles and storage shared by every request.
#[derive(Clone, Debug)]
pub struct AppState {
    vision: ProviderClient,
    chat: ProviderClient,
    illustration_base: Url,
    store: DrawingStore,
}

impl AppState {
    /// Builds the provider clients and drawing store from the startup config.
    pub fn new(config: &AppConfig) -> Result<Self, AirDrawError> {
        let http = http_client(config.provider_timeout)?;
        Ok(Self::with_http(config, http))
    }

    /// Same as [`AppState::new`], sharing an HTTP client built elsewhere.
    pub fn with_http(config: &AppConfig, http: reqwest::Client) -> Self {
        Self {
            vision: ProviderClient::with_http(http.clone(), &config.vision),
            chat: ProviderClient::with_http(http, &config.chat),
            illustration_base: config.illustration_base.clone(),
            store: DrawingStore::new(&config.media_dir),
        }
    }
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    groq_api_configured: bool,
    vision_api_configured: bool,
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AirDraw Vision API is running",
        status: "ok",
    })
}

/// Reports which provider keys are present, without calling them.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        groq_api_configured: state.chat.is_configured(),
        vision_api_configured: state.vision.is_configured(),
    })
}

/// Builds the application router, with saved drawings served under `/media`.
pub fn create_router(state: AppState) -> Router {
    let media = ServeDir::new(state.store.dir());
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze-drawing", post(drawings::analyze_drawing_handler))
        .route("/finish-drawing", post(drawings::finish_drawing_handler))
        .route("/ghost-guide", post(drawings::ghost_guide_handler))
        .route("/save-drawing", post(drawings::save_drawing_handler))
        .route("/voice-chat", post(assistant::voice_chat_handler))
        .route("/analyze-screen", post(assistant::analyze_screen_handler))
        .nest_service(MEDIA_ROUTE, media)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    state: AppState,
) -> Result<(), anyhow::Error> {
    let app = create_router(state);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", err);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
