//! Guard and validation behavior that is decided before any query runs.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use common::{TEST_SECRET, jwt_config, send, setup_offline_app};
use hostelhub::hostelhub_auth::{issue_owner_token, issue_student_token, issue_super_admin_token};
use hostelhub::hostelhub_config::JwtConfig;

fn owner_token() -> String {
    issue_owner_token(1, "Owner", "01711111111", &jwt_config()).unwrap()
}

fn student_token() -> String {
    issue_student_token(2, 1, "Student", "01822222222", &jwt_config()).unwrap()
}

fn super_admin_token() -> String {
    issue_super_admin_token(3, "Root", "root", &jwt_config()).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_401_json() {
    let app = setup_offline_app();

    for uri in [
        "/api/categories",
        "/api/students",
        "/api/rents",
        "/api/rent/current",
        "/api/payments",
        "/api/student/rents",
        "/api/super-admin/owners",
        "/api/auth/me",
    ] {
        let response = send(&app, "GET", uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.body["error"], "Authentication required", "{uri}");
        assert_eq!(response.body["reason"], "missing", "{uri}");
    }
}

#[tokio::test]
async fn test_browser_is_redirected_to_login_page() {
    let app = setup_offline_app();

    for (uri, location) in [
        ("/api/categories", "/login"),
        ("/api/student/rents", "/student/login"),
        ("/api/super-admin/students", "/super-admin/login"),
    ] {
        let request = Request::builder()
            .uri(uri)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], location, "{uri}");
    }
}

#[tokio::test]
async fn test_token_of_another_type_is_rejected() {
    let app = setup_offline_app();

    let cases = [
        ("/api/categories", student_token()),
        ("/api/categories", super_admin_token()),
        ("/api/student/rents", owner_token()),
        ("/api/super-admin/owners", owner_token()),
        ("/api/super-admin/owners", student_token()),
    ];

    for (uri, token) in cases {
        let response = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.body["reason"], "wrong_type", "{uri}");
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = setup_offline_app();
    let foreign = JwtConfig::with_secret(format!("{TEST_SECRET}-other"));
    let token = issue_owner_token(1, "Owner", "01711111111", &foreign).unwrap();

    let response = send(&app, "GET", "/api/categories", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["reason"], "invalid_signature");
}

#[tokio::test]
async fn test_cookie_of_another_type_does_not_authorize() {
    let app = setup_offline_app();
    let request = Request::builder()
        .uri("/api/categories")
        .header(header::COOKIE, format!("student_token={}", student_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_expires_every_auth_cookie() {
    let app = setup_offline_app();
    let response = send(&app, "POST", "/api/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");

    let cookies: Vec<&str> = response
        .headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    for name in ["auth_token=", "student_token=", "super_admin_token="] {
        let cookie = cookies
            .iter()
            .find(|c| c.starts_with(name))
            .unwrap_or_else(|| panic!("{name} not cleared"));
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
    }
}

#[tokio::test]
async fn test_signup_validation_is_400_before_any_query() {
    let app = setup_offline_app();

    let response = send(
        &app,
        "POST",
        "/api/owner/signup",
        None,
        Some(json!({ "name": "Rahim", "phone": "0171", "password": "password123" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/owner/signup",
        None,
        Some(json!({ "name": "Rahim", "password": "password123" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "phone is required");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_offline_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/logout")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}
