#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;
pub mod token;

use axum::Router;

use crate::middleware::auth::AppState;

pub fn api_router(state: AppState) -> Router {
    let apiRoutes = routes::api_routes(state.clone());
    let authRoutes = routes::auth::routes();

    Router::new()
        .merge(apiRoutes)
        .merge(authRoutes)
        .with_state(state)
}
