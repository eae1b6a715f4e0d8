use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

use obra_types::{ApiEnvelope, User};

use super::{respond, to_json};
use crate::middleware::auth::AppState;

const INVALID_CREDENTIALS: &str = "Invalid name or password";

#[derive(Debug, Deserialize)]
struct UserPass {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    username: String,
    email: String,
    password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", routing::post(login))
        .route("/api/v1/auth/logout", routing::get(logout))
        .route("/api/v1/auth/register", routing::post(register))
        .route("/api/v1/auth/role/:name", routing::get(get_role))
}

/// Verifies credentials and issues a session token, both in the body for
/// the browser session and as an HttpOnly cookie for server-side checks.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(userPass): Json<UserPass>,
) -> Response {
    debug!(email = %userPass.email, "login attempt");

    let Some(user) = state.store.users.find(|u| u.email == userPass.email) else {
        warn!(email = %userPass.email, "login for unknown email");
        return respond(ApiEnvelope::error(403, INVALID_CREDENTIALS));
    };

    let passwordOk = bcrypt::verify(&userPass.password, &user.hashed_password).unwrap_or(false);
    if !user.is_active || !passwordOk {
        warn!(email = %userPass.email, active = user.is_active, "login rejected");
        return respond(ApiEnvelope::error(403, INVALID_CREDENTIALS));
    }

    let Some(role) = state.store.roles.get(user.role_id) else {
        error!(role_id = user.role_id, "login with dangling role");
        return respond(ApiEnvelope::error(403, "Role not found"));
    };

    let token = match state.tokens.issue(&user.email, &role.name) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "could not issue session token");
            return respond(ApiEnvelope::error(500, format!("Encoding JWT error: {}", e)));
        }
    };

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .build();

    (
        jar.add(cookie),
        respond(ApiEnvelope::ok("Ok", json!({ "token": token }))),
    )
        .into_response()
}

/// Creates an active account with the default role; only the password
/// leaves this handler hashed.
async fn register(State(state): State<AppState>, Json(newUser): Json<NewUser>) -> Response {
    debug!(email = %newUser.email, "register attempt");

    if state
        .store
        .users
        .find(|u| u.email == newUser.email)
        .is_some()
    {
        warn!(email = %newUser.email, "register with taken email");
        return respond(ApiEnvelope::error(400, "Email is already registered"));
    }

    let hashed = match bcrypt::hash(&newUser.password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(e) => {
            error!(error = %e, "could not hash password");
            return respond(ApiEnvelope::error(500, "Error creating user"));
        }
    };

    let defaultRole = state
        .store
        .roles
        .find(|r| r.name == "user")
        .and_then(|r| r.id)
        .unwrap_or(2);

    let user = state.store.users.create(User {
        username: newUser.username,
        email: newUser.email,
        hashed_password: hashed,
        role_id: defaultRole,
        is_active: true,
        ..User::default()
    });

    respond(ApiEnvelope::created("User created", to_json(&user)))
}

/// Clears the session cookie and bounces to the public home page. The
/// expired cookie is sent even when the request carried none, so stale
/// browser state is cleared regardless.
async fn logout(jar: CookieJar) -> Response {
    debug!("logout");
    let mut removal = Cookie::build(("token", "")).path("/").build();
    removal.make_removal();
    (jar.add(removal), Redirect::to("/")).into_response()
}

async fn get_role(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    debug!(role = %name, "role lookup");
    match state.store.roles.find(|r| r.name == name) {
        Some(role) => respond(ApiEnvelope::ok("Role", to_json(&role))),
        None => respond(ApiEnvelope::error(404, "Role not found")),
    }
}
