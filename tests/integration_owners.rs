#![cfg(feature = "db-tests")]

mod common;

use axum::http::{StatusCode, header};
use serde_json::json;
use sqlx::PgPool;

use common::{PASSWORD, create_owner, owner_token, send, setup_test_app, unique_phone};

async fn stored_otp(pool: &PgPool, phone: &str) -> String {
    sqlx::query_scalar("SELECT otp FROM owners WHERE phone = $1")
        .bind(phone)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn signup_body(phone: &str) -> serde_json::Value {
    json!({ "name": "Rahim", "phone": phone, "password": PASSWORD })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_verify_login_flow(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();

    let response = send(&app, "POST", "/api/owner/signup", None, Some(signup_body(&phone))).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["owner"]["status"], "pending");
    assert!(response.body["owner"].get("password_hash").is_none());
    assert!(response.body["owner"].get("otp").is_none());

    let otp = stored_otp(&pool, &phone).await;
    assert_eq!(otp.len(), 6);
    assert!(otp.chars().all(|c| c.is_ascii_digit()));

    let login = json!({ "phone": phone, "password": PASSWORD });
    let response = send(&app, "POST", "/api/owner/login", None, Some(login.clone())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let wrong = if otp == "000000" { "111111" } else { "000000" };
    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": wrong })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": otp })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "active");

    let cleared: Option<String> = sqlx::query_scalar("SELECT otp FROM owners WHERE phone = $1")
        .bind(&phone)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(cleared.is_none());

    // Verifying an active owner again is a no-op
    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": otp })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(&app, "POST", "/api/owner/login", None, Some(login)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].is_string());

    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let token = response.body["token"].as_str().unwrap();
    let response = send(&app, "GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["type"], "admin");
    assert_eq!(response.body["owner"]["phone"], phone.as_str());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_otp_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();

    send(&app, "POST", "/api/owner/signup", None, Some(signup_body(&phone))).await;
    let otp = stored_otp(&pool, &phone).await;

    sqlx::query("UPDATE owners SET otp_expire = NOW() - INTERVAL '1 minute' WHERE phone = $1")
        .bind(&phone)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": otp })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // A resend issues a fresh code that works
    let response = send(
        &app,
        "POST",
        "/api/owner/resend-otp",
        None,
        Some(json!({ "phone": phone })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let fresh = stored_otp(&pool, &phone).await;
    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": fresh })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(
        &app,
        "POST",
        "/api/owner/resend-otp",
        None,
        Some(json!({ "phone": phone })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_phone_is_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();

    let first = send(&app, "POST", "/api/owner/signup", None, Some(signup_body(&phone))).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, "POST", "/api/owner/signup", None, Some(signup_body(&phone))).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_uniform(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    create_owner(&pool, &phone, "active").await;

    let unknown = send(
        &app,
        "POST",
        "/api/owner/login",
        None,
        Some(json!({ "phone": unique_phone(), "password": PASSWORD })),
    )
    .await;
    let wrong = send(
        &app,
        "POST",
        "/api/owner/login",
        None,
        Some(json!({ "phone": phone, "password": "not-the-password" })),
    )
    .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_for_deleted_owner_is_401(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let token = owner_token(&app, &phone).await;

    sqlx::query("DELETE FROM owners WHERE id = $1")
        .bind(owner_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_otp_is_discarded_after_repeated_wrong_codes(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();

    send(&app, "POST", "/api/owner/signup", None, Some(signup_body(&phone))).await;
    let otp = stored_otp(&pool, &phone).await;
    let wrong = if otp == "000000" { "111111" } else { "000000" };

    for _ in 0..4 {
        let response = send(
            &app,
            "POST",
            "/api/owner/verify-otp",
            None,
            Some(json!({ "phone": phone, "otp": wrong })),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "Invalid OTP");
    }

    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": wrong })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Too many invalid attempts, request a new OTP");

    // The right code no longer works
    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": otp })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let cleared: Option<String> = sqlx::query_scalar("SELECT otp FROM owners WHERE phone = $1")
        .bind(&phone)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(cleared.is_none());

    let response = send(
        &app,
        "POST",
        "/api/owner/resend-otp",
        None,
        Some(json!({ "phone": phone })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let fresh = stored_otp(&pool, &phone).await;
    let response = send(
        &app,
        "POST",
        "/api/owner/verify-otp",
        None,
        Some(json!({ "phone": phone, "otp": fresh })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "active");
}
