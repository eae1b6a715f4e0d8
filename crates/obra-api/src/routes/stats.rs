use axum::{extract::State, response::Response, routing, Router};
use serde_json::Value;
use tracing::debug;

use obra_types::ApiEnvelope;

use super::respond;
use crate::middleware::auth::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/stats/projects", routing::get(count_projects))
        .route("/api/v1/stats/budgets", routing::get(count_budgets))
}

async fn count_projects(State(state): State<AppState>) -> Response {
    debug!("counting projects");
    respond(ApiEnvelope::ok(
        "Projects counted successfully",
        Value::from(state.store.projects.count()),
    ))
}

async fn count_budgets(State(state): State<AppState>) -> Response {
    debug!("counting budgets");
    respond(ApiEnvelope::ok(
        "Budgets counted successfully",
        Value::from(state.store.budgets.count()),
    ))
}
