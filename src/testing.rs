//! Helpers for tests that need a provider on the other end of a socket.

use std::path::Path;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::config::{AppConfig, ProviderConfig, parse_illustration_base};
use crate::constants::USER_AGENT;
use crate::provider::ProviderClient;

/// Nothing listens on the discard port, so connections are refused quickly.
pub(crate) const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9/v1/chat/completions";

pub(crate) fn provider_config(endpoint: &str, api_key: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        endpoint: endpoint.to_string(),
        model: "test-model".to_string(),
        api_key: api_key.map(str::to_string),
    }
}

/// Mock providers listen on loopback, so skip any proxy from the environment.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .no_proxy()
        .build()
        .expect("build test http client")
}

pub(crate) fn provider_client(endpoint: &str, api_key: Option<&str>) -> ProviderClient {
    ProviderClient::with_http(http_client(), &provider_config(endpoint, api_key))
}

pub(crate) fn app_config(
    chat: ProviderConfig,
    vision: ProviderConfig,
    media_dir: &Path,
) -> AppConfig {
    AppConfig {
        chat,
        vision,
        illustration_base: parse_illustration_base("https://image.example.org/prompt")
            .expect("valid base"),
        media_dir: media_dir.to_path_buf(),
        provider_timeout: None,
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock provider");
    let addr = listener.local_addr().expect("mock provider address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/v1/chat/completions")
}

/// Starts a provider that answers every completion with `reply`.
pub(crate) async fn spawn_completion_server(reply: &'static str) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": reply},
                    "finish_reason": "stop"
                }]
            }))
        }),
    );
    serve(app).await
}

/// Starts a provider that fails every completion with `status`.
pub(crate) async fn spawn_failing_server(status: StatusCode) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            (
                status,
                Json(json!({"error": {"message": "mock failure"}})),
            )
        }),
    );
    serve(app).await
}
