pub mod auth;
pub mod records;
pub mod stats;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::middleware::auth::{require_api_auth, AppState};
use obra_types::ApiEnvelope;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(records::routes())
        .merge(stats::routes())
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

/// Sends the envelope with its own status as the HTTP status.
pub(crate) fn respond(envelope: ApiEnvelope<Value>) -> Response {
    let status =
        StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

pub(crate) fn to_json<S: Serialize>(row: &S) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}
