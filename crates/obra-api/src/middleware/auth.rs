use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
};
use std::sync::Arc;

use obra_store::Store;
use obra_types::ApiEnvelope;

use crate::token::TokenConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub tokens: TokenConfig,
}

/// Middleware for API routes: checks Authorization: Bearer <token>,
/// falling back to the token cookie browsers send along.
pub async fn require_api_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let bearerToken = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let cookieHeader = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = bearerToken.or_else(|| extract_cookie_value(cookieHeader, "token"));

    let isAuthorized = token
        .map(|t| state.tokens.verify(&t).is_ok())
        .unwrap_or(false);

    if !isAuthorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiEnvelope::<()>::error(401, "unauthorized")),
        )
            .into_response();
    }

    next.run(request).await
}

/// Middleware for page routes: admin pages need a valid token cookie with
/// the admin role. Everything outside /admin passes through.
pub async fn require_page_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !path.starts_with("/admin") {
        return next.run(request).await;
    }

    let cookieHeader = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let claims = extract_cookie_value(cookieHeader, "token")
        .and_then(|token| state.tokens.verify(&token).ok());

    match claims {
        Some(claims) if claims.role == "admin" => next.run(request).await,
        Some(_) => Redirect::to("/").into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

fn extract_cookie_value(cookieHeader: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for part in cookieHeader.split(';') {
        let trimmed = part.trim();
        if trimmed.starts_with(&prefix) {
            return Some(trimmed[prefix.len()..].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_named_cookie_among_many() {
        let header = "theme=dark; token=abc.def.ghi; lang=es";
        assert_eq!(
            extract_cookie_value(header, "token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(
            extract_cookie_value(header, "theme").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(extract_cookie_value("", "token"), None);
        assert_eq!(extract_cookie_value("theme=dark", "token"), None);
    }

    #[test]
    fn name_must_match_whole_key() {
        // "token" must not match inside "csrf_token".
        let header = "csrf_token=zzz";
        assert_eq!(extract_cookie_value(header, "token"), None);
    }
}
