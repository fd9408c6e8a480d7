use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast;

use lib_common::copy::{query, CopyError, CopyRecord, ListOutcome};

use crate::copy_logic::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    since: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: String,
}

/// The static `/copy/refresh` route is registered alongside the `{key}`
/// capture; the router gives it precedence, so a record keyed "refresh" is
/// not reachable by lookup. That matches the original routing.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/copy", get(list_copy))
        .route("/copy/refresh", get(refresh_copy).post(refresh_copy))
        .route("/copy/{key}", get(copy_by_key))
        .route("/health", get(health_handler))
        .with_state(app_state)
}

/// Serves the router on `listener` until the shutdown signal fires.
pub async fn run(
    listener: tokio::net::TcpListener,
    app_state: AppState,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = router(app_state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.recv().await.ok();
            log::info!("HTTP server shutting down.");
        })
        .await?;
    Ok(())
}

async fn list_copy(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let snapshot = state.snapshot().await;
    match query::list_since(&snapshot, params.since.as_deref()) {
        Ok(ListOutcome::Records(records)) => Ok(Json(records).into_response()),
        Ok(ListOutcome::Empty { message }) => Ok(Json(json!({ "message": message })).into_response()),
        Err(err) => Err(error_response(err)),
    }
}

async fn copy_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CopyRecord>, (StatusCode, Json<ErrorBody>)> {
    let snapshot = state.snapshot().await;
    let record = query::find_by_key(&snapshot, &key).map_err(error_response)?;
    Ok(Json(record))
}

async fn refresh_copy(
    State(state): State<AppState>,
) -> Result<Json<Vec<CopyRecord>>, (StatusCode, Json<ErrorBody>)> {
    let snapshot = state.refresh().await.map_err(error_response)?;
    Ok(Json((*snapshot).clone()))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn error_response(err: CopyError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        CopyError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
        CopyError::KeyNotFound => StatusCode::NOT_FOUND,
        CopyError::RemoteFetch(_) => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        log::error!("{err}");
    }
    (status, Json(ErrorBody { error: err.to_string() }))
}
