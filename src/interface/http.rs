//! # HTTP Interface
//!
//! Exposes the dispatcher over HTTP:
//! - `POST /execute` dispatches a prompt
//! - `GET /context` returns the recent-query history
//! - `GET /functions` lists registered actions
//! - `GET /health` is a liveness probe

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tower_http::cors::CorsLayer;

use crate::application::dispatcher::Dispatcher;
use crate::domain::error::DispatchError;
use crate::domain::types::{DispatchRequest, DispatchResult};

#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Maps dispatch errors to status codes.
#[derive(Debug)]
pub struct ApiError(DispatchError);

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Construct the router with all routes installed. Any origin may call it.
pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/execute", post(execute))
        .route("/context", get(context))
        .route("/functions", get(functions))
        .layer(CorsLayer::permissive())
        .with_state(AppState { dispatcher })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn execute(
    State(state): State<AppState>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<DispatchResult>, ApiError> {
    let result = state.dispatcher.dispatch(&request).await?;
    Ok(Json(result))
}

async fn context(State(state): State<AppState>) -> Json<Value> {
    let events = state.dispatcher.context().await;
    Json(json!({"context_memory": events}))
}

async fn functions(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let mut listing = Map::new();
    for action in state.dispatcher.registry().all() {
        let entry = serde_json::to_value(action).map_err(|e| DispatchError::Internal {
            action: action.name.clone(),
            message: e.to_string(),
        })?;
        listing.insert(action.name.clone(), entry);
    }
    Ok(Json(json!({"functions": listing})))
}
