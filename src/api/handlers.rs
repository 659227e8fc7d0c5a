//! HTTP request handlers

use super::sse::turn_stream;
use super::types::{ChatRequest, ErrorResponse, FlagRequest, SuccessResponse};
use super::AppState;
use crate::agents::{DemoInfo, FLAGGING_OPTIONS};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/demo", get(get_demo))
        .route("/api/chat", post(chat))
        .route("/api/flag", post(flag))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn get_demo(State(state): State<AppState>) -> Json<DemoInfo> {
    Json(state.demo.as_ref().clone())
}

/// Run one turn and stream transcript snapshots as they are produced
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is empty".to_string()));
    }

    tracing::debug!(
        history_len = req.history.len(),
        agent = %state.driver.agent().name,
        "Chat request"
    );

    let snapshots = state.driver.chat(&req.text, &req.history);
    Ok(turn_stream(snapshots).into_response())
}

/// Record a user's flag on a response
async fn flag(Json(req): Json<FlagRequest>) -> Result<Json<SuccessResponse>, AppError> {
    if !FLAGGING_OPTIONS.contains(&req.option.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown flag option: {}",
            req.option
        )));
    }

    let flagged = req
        .messages
        .iter()
        .rev()
        .find(|m| m.is_text_reply() && !m.content.is_empty())
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    tracing::info!(
        option = %req.option,
        messages = req.messages.len(),
        response = %flagged,
        "Response flagged"
    );

    Ok(Json(SuccessResponse { success: true }))
}

async fn get_version() -> &'static str {
    concat!("campus-agent ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
