use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use engine::Session;
use serde::Deserialize;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ComputeRequest, ComputeResponse, ServerEvent},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{compute, internal, parse_client_message, run_client_request};
use app_state::AppState;
use config::load_settings;

#[derive(Debug, Deserialize)]
struct ComputeQuery {
    #[serde(default)]
    input: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings()?;
    let state = AppState {
        options: settings.engine_options(),
        max_input_bytes: settings.max_input_bytes,
        max_body_bytes: settings.max_body_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        stop_at = settings.stop_at,
        max_terms = settings.max_terms,
        max_output_bytes = settings.max_output_bytes,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = RequestBodyLimitLayer::new(state.max_body_bytes);
    Router::new()
        .route("/healthz", get(healthz))
        .route("/digital-root", get(http_compute_query).post(http_compute))
        .route("/ws", get(ws_handler))
        .layer(body_limit)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn http_compute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ComputeRequest>,
) -> Result<Json<ComputeResponse>, (StatusCode, Json<ApiError>)> {
    let response = compute(state, req.input)
        .await
        .map_err(|e| (status_for(e.code), Json(e)))?;
    Ok(Json(response))
}

async fn http_compute_query(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ComputeQuery>,
) -> Result<Json<ComputeResponse>, (StatusCode, Json<ApiError>)> {
    let response = compute(state, q.input)
        .await
        .map_err(|e| (status_for(e.code), Json(e)))?;
    Ok(Json(response))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

/// Every connection owns its session; nothing is shared between sockets.
async fn ws_connection(state: Arc<AppState>, socket: axum::extract::ws::WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut session = Session::new(state.options);
    info!("websocket session opened");

    while let Some(Ok(msg)) = receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let request = parse_client_message(&text);
        let (next, event) = run_client_request(session, request, state.max_input_bytes).await;
        session = next;
        let reply = match encode_event(&event) {
            Ok(v) => v,
            Err(error) => {
                error!(%error, "failed to serialize server event");
                match encode_event(&ServerEvent::Error(internal(error))) {
                    Ok(v) => v,
                    Err(_) => continue,
                }
            }
        };
        if sender.send(Message::Text(reply)).await.is_err() {
            break;
        }
    }

    info!("websocket session closed");
}

fn encode_event(event: &ServerEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
