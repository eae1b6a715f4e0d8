#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use obra_api::{api_router, middleware::auth::AppState, token::TokenConfig};
use obra_store::{seed, Store};
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "password";

pub fn test_state() -> AppState {
    let store = Store::new();
    seed::populate(&store, ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    AppState {
        store: Arc::new(store),
        tokens: TokenConfig::new("test_secret", 60),
    }
}

pub fn test_app() -> (Router, AppState) {
    let state = test_state();
    (api_router(state.clone()), state)
}

pub fn admin_token(state: &AppState) -> String {
    state.tokens.issue(ADMIN_EMAIL, "admin").unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
