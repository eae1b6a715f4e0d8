use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use obra_types::{decode_claims, User};
use serde_json::json;
use tower::ServiceExt;

#[path = "common.rs"]
mod common;

#[tokio::test]
async fn register_creates_an_active_account() {
    let (app, state) = common::test_app();

    let payload = json!({
        "username": "U-TEST",
        "email": "u-test@test.com",
        "password": "password",
    });
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/register",
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "User created");
    assert_eq!(body["data"]["username"], "U-TEST");
    // The stored hash must never be echoed back.
    assert!(body["data"].get("hashed_password").is_none());

    let created = state
        .store
        .users
        .find(|u| u.email == "u-test@test.com")
        .unwrap();
    assert!(created.is_active);

    let login = app
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/login",
            &json!({ "email": "u-test@test.com", "password": "password" }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_a_taken_email() {
    let (app, _state) = common::test_app();

    let payload = json!({
        "username": "someone-else",
        "email": common::ADMIN_EMAIL,
        "password": "password",
    });
    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/register",
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Email is already registered");
}

#[tokio::test]
async fn login_sets_a_session_cookie_and_returns_the_token() {
    let (app, _state) = common::test_app();

    let payload = json!({
        "email": common::ADMIN_EMAIL,
        "password": common::ADMIN_PASSWORD,
    });
    let response = app
        .oneshot(common::json_request("POST", "/api/v1/auth/login", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let body = common::body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap();
    let claims = decode_claims(token).unwrap();
    assert_eq!(claims.sub, common::ADMIN_EMAIL);
    assert_eq!(claims.role, "admin");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let (app, _state) = common::test_app();

    let payload = json!({
        "email": common::ADMIN_EMAIL,
        "password": "not-the-password",
    });
    let response = app
        .oneshot(common::json_request("POST", "/api/v1/auth/login", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Invalid name or password");
}

#[tokio::test]
async fn login_rejects_an_unknown_email() {
    let (app, _state) = common::test_app();

    let payload = json!({
        "email": "nobody@test.com",
        "password": "password",
    });
    let response = app
        .oneshot(common::json_request("POST", "/api/v1/auth/login", &payload))
        .await
        .unwrap();

    // Same message as a bad password so the response does not reveal
    // which half of the pair was wrong.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Invalid name or password");
}

#[tokio::test]
async fn login_rejects_a_deactivated_account() {
    let (app, state) = common::test_app();

    let role = state.store.roles.find(|r| r.name == "user").unwrap();
    state.store.users.create(User {
        username: "dormant".into(),
        email: "dormant@test.com".into(),
        hashed_password: bcrypt::hash("password", 4).unwrap(),
        role_id: role.id.unwrap(),
        is_active: false,
        ..Default::default()
    });

    let payload = json!({
        "email": "dormant@test.com",
        "password": "password",
    });
    let response = app
        .oneshot(common::json_request("POST", "/api/v1/auth/login", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_expires_the_cookie_and_redirects_home() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/logout")
                .header(header::COOKIE, format!("token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_without_a_cookie_still_sends_the_removal() {
    let (app, _state) = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("removal cookie must be present")
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn role_lookup_by_name() {
    let (app, _state) = common::test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/role/admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["name"], "admin");

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/role/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
