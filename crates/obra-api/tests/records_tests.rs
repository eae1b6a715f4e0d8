use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use obra_api::token::TokenConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

#[path = "common.rs"]
mod common;

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn authed_json(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let (app, _state) = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "unauthorized");
}

#[tokio::test]
async fn bearer_and_cookie_tokens_are_both_accepted() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let via_header = app
        .clone()
        .oneshot(authed("GET", "/api/v1/projects", &token))
        .await
        .unwrap();
    assert_eq!(via_header.status(), StatusCode::OK);

    let via_cookie = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects")
                .header(header::COOKIE, format!("session_hint=1; token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(via_cookie.status(), StatusCode::OK);
}

#[tokio::test]
async fn a_token_signed_with_another_secret_is_rejected() {
    let (app, _state) = common::test_app();
    let forged = TokenConfig::new("not_the_server_secret", 60)
        .issue(common::ADMIN_EMAIL, "admin")
        .unwrap();

    let response = app
        .oneshot(authed("GET", "/api/v1/projects", &forged))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_assigns_the_id_and_audit_stamps() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let payload = json!({
        "name": "litre",
        "symbol": "L",
        "formula": "v",
    });
    let response = app
        .oneshot(authed_json("POST", "/api/v1/units", &token, &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Item created");
    // Five seeded units, so the new row lands on the next id.
    assert_eq!(body["data"]["id"], 6);
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());
}

#[tokio::test]
async fn read_by_id_finds_the_row_or_404s() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let found = app
        .clone()
        .oneshot(authed("GET", "/api/v1/units?id=1", &token))
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    let body = common::body_json(found).await;
    assert_eq!(body["message"], "Item found");
    assert_eq!(body["data"]["name"], "meter");

    let missing = app
        .oneshot(authed("GET", "/api/v1/units?id=999", &token))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(missing).await;
    assert_eq!(body["message"], "Item 999 not found");
}

#[tokio::test]
async fn update_replaces_the_row_but_keeps_created_at() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let created = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/v1/units",
            &token,
            &json!({ "name": "litre", "symbol": "L", "formula": "v" }),
        ))
        .await
        .unwrap();
    let mut body = common::body_json(created).await;
    let mut row = body["data"].take();
    let created_at = row["created_at"].as_str().unwrap().to_string();

    row["symbol"] = json!("dm3");
    let updated = app
        .clone()
        .oneshot(authed_json("PATCH", "/api/v1/units", &token, &row))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let body = common::body_json(updated).await;
    assert_eq!(body["message"], "Item updated");
    assert_eq!(body["data"]["symbol"], "dm3");
    assert_eq!(body["data"]["created_at"], created_at.as_str());

    let reread = app
        .oneshot(authed("GET", "/api/v1/units?id=6", &token))
        .await
        .unwrap();
    let body = common::body_json(reread).await;
    assert_eq!(body["data"]["symbol"], "dm3");
}

#[tokio::test]
async fn update_without_an_id_is_rejected() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let response = app
        .oneshot(authed_json(
            "PATCH",
            "/api/v1/units",
            &token,
            &json!({ "name": "litre", "symbol": "L", "formula": "v" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "ID is mandatory");
}

#[tokio::test]
async fn delete_returns_the_removed_row_exactly_once() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let deleted = app
        .clone()
        .oneshot(authed("DELETE", "/api/v1/units?id=5", &token))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let body = common::body_json(deleted).await;
    assert_eq!(body["message"], "Item deleted");
    assert_eq!(body["data"]["name"], "hour");

    let gone = app
        .clone()
        .oneshot(authed("GET", "/api/v1/units?id=5", &token))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let again = app
        .clone()
        .oneshot(authed("DELETE", "/api/v1/units?id=5", &token))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let no_id = app
        .oneshot(authed("DELETE", "/api/v1/units", &token))
        .await
        .unwrap();
    assert_eq!(no_id.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(no_id).await;
    assert_eq!(body["message"], "ID is mandatory");
}

#[tokio::test]
async fn paged_lists_sort_and_report_the_full_count() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let response = app
        .clone()
        .oneshot(authed(
            "GET",
            "/api/v1/units?page=1&limit=2&sort_by=name",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    // Ascending is the default direction when none is given.
    assert_eq!(names, ["cubic meter", "hour"]);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["records"], 5);

    let reversed = app
        .oneshot(authed(
            "GET",
            "/api/v1/units?page=1&limit=2&sort_by=name&asc=false",
            &token,
        ))
        .await
        .unwrap();
    let body = common::body_json(reversed).await;
    assert_eq!(body["data"][0]["name"], "square meter");
}

#[tokio::test]
async fn a_bare_list_returns_every_row_unpaged() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let response = app
        .oneshot(authed("GET", "/api/v1/units", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Items list");
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert!(body.get("pagination").is_none());
}

#[tokio::test]
async fn text_filters_match_anywhere_in_the_value() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/v1/projects?title=ring", &token))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["code"], "PRJ-002");
    assert_eq!(body["pagination"]["records"], 1);

    // Keys no column answers to are ignored rather than failing the query.
    let unknown = app
        .oneshot(authed("GET", "/api/v1/projects?bogus=zzz", &token))
        .await
        .unwrap();
    let body = common::body_json(unknown).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn stats_report_the_seeded_counts() {
    let (app, state) = common::test_app();
    let token = common::admin_token(&state);

    let projects = app
        .clone()
        .oneshot(authed("GET", "/api/v1/stats/projects", &token))
        .await
        .unwrap();
    assert_eq!(projects.status(), StatusCode::OK);
    let body = common::body_json(projects).await;
    assert_eq!(body["message"], "Projects counted successfully");
    assert_eq!(body["data"], 3);

    let budgets = app
        .oneshot(authed("GET", "/api/v1/stats/budgets", &token))
        .await
        .unwrap();
    let body = common::body_json(budgets).await;
    assert_eq!(body["data"], 3);
}
