#![cfg(feature = "db-tests")]

mod common;

use axum::http::{StatusCode, header};
use serde_json::json;
use sqlx::PgPool;

use common::{
    PASSWORD, create_category, create_owner, create_student, create_super_admin, owner_token,
    send, setup_test_app, student_token, super_admin_token, unique_phone,
};
use hostelhub::hostelhub_config::JwtConfig;
use hostelhub::state::AppState;

#[sqlx::test(migrations = "./migrations")]
async fn test_student_login_rehashes_legacy_secret(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let owner_id = create_owner(&pool, &unique_phone(), "active").await;
    let phone = unique_phone();
    let student_id = create_student(&pool, owner_id, None, &phone, "legacy-pass", "living").await;

    let response = send(
        &app,
        "POST",
        "/api/student/login",
        None,
        Some(json!({ "phone": phone, "password": "legacy-pass" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["student"]["id"], student_id.into_inner());
    assert!(
        response.headers[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("student_token=")
    );

    let stored: String = sqlx::query_scalar("SELECT password FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$2"));

    // The rehashed secret still works
    student_token(&app, &phone, "legacy-pass").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_who_left_cannot_login(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let owner_id = create_owner(&pool, &unique_phone(), "active").await;
    let phone = unique_phone();
    create_student(&pool, owner_id, None, &phone, "secret1", "leave").await;

    let wrong = send(
        &app,
        "POST",
        "/api/student/login",
        None,
        Some(json!({ "phone": phone, "password": "nope" })),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let right = send(
        &app,
        "POST",
        "/api/student/login",
        None,
        Some(json!({ "phone": phone, "password": "secret1" })),
    )
    .await;
    assert_eq!(right.status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_sees_only_own_rents(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let owner_phone = unique_phone();
    let owner_id = create_owner(&pool, &owner_phone, "active").await;
    let category_id = create_category(&pool, owner_id, 3000, 0).await;
    let phone = unique_phone();
    let student_id =
        create_student(&pool, owner_id, Some(category_id), &phone, "secret1", "living").await;
    create_student(&pool, owner_id, Some(category_id), &unique_phone(), "x", "living").await;

    let owner = owner_token(&app, &owner_phone).await;
    let generated = send(&app, "POST", "/api/rents/generate", Some(&owner), None).await;
    assert_eq!(generated.body["created"], 2);

    let token = student_token(&app, &phone, "secret1").await;
    let rents = send(&app, "GET", "/api/student/rents", Some(&token), None).await;
    assert_eq!(rents.status, StatusCode::OK);
    assert_eq!(rents.body["meta"]["total"], 1);
    assert_eq!(rents.body["data"][0]["student_id"], student_id.into_inner());

    let me = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.body["type"], "student");
    assert_eq!(me.body["student"]["id"], student_id.into_inner());

    // A student token does not open owner routes
    let categories = send(&app, "GET", "/api/categories", Some(&token), None).await;
    assert_eq!(categories.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_signup_is_gated(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let body = json!({
        "username": "root",
        "email": "root@hostelhub.test",
        "password": PASSWORD,
        "name": "Root"
    });

    let disabled = send(&app, "POST", "/api/super-admin/signup", None, Some(body.clone())).await;
    assert_eq!(disabled.status, StatusCode::FORBIDDEN);

    let mut state = AppState::with_defaults(pool.clone(), JwtConfig::with_secret(common::TEST_SECRET));
    state.server_config.super_admin_signup_enabled = true;
    let app = hostelhub::router::init_router(state);

    let created = send(&app, "POST", "/api/super-admin/signup", None, Some(body.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["role"], "super_admin");
    assert!(created.body.get("password_hash").is_none());

    let duplicate = send(&app, "POST", "/api/super-admin/signup", None, Some(body)).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_super_admin_cannot_login(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    create_super_admin(&pool, "sleeper", "inactive").await;

    let response = send(
        &app,
        "POST",
        "/api/super-admin/login",
        None,
        Some(json!({ "username": "sleeper", "password": PASSWORD })),
    )
    .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_manages_all_tenants(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    create_super_admin(&pool, "root", "active").await;
    let token = super_admin_token(&app, "root").await;

    let owner_a = create_owner(&pool, &unique_phone(), "active").await;
    let owner_b = create_owner(&pool, &unique_phone(), "pending").await;
    let student_a = create_student(&pool, owner_a, None, &unique_phone(), "x", "living").await;
    create_student(&pool, owner_b, None, &unique_phone(), "x", "living").await;

    let owners = send(&app, "GET", "/api/super-admin/owners", Some(&token), None).await;
    assert_eq!(owners.status, StatusCode::OK);
    assert_eq!(owners.body["meta"]["total"], 2);
    assert_eq!(owners.body["data"][0]["student_count"], 1);

    let pending = send(
        &app,
        "GET",
        "/api/super-admin/owners?status=pending",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(pending.body["meta"]["total"], 1);
    assert_eq!(pending.body["data"][0]["id"], owner_b.into_inner());

    let students = send(&app, "GET", "/api/super-admin/students", Some(&token), None).await;
    assert_eq!(students.body["meta"]["total"], 2);

    let filtered = send(
        &app,
        "GET",
        &format!("/api/super-admin/students?owner_id={}", owner_a),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(filtered.body["meta"]["total"], 1);
    assert_eq!(filtered.body["data"][0]["id"], student_a.into_inner());

    let updated = send(
        &app,
        "PUT",
        &format!("/api/super-admin/students/{}", student_a),
        Some(&token),
        Some(json!({ "status": "leave" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "leave");

    let blocked = send(
        &app,
        "DELETE",
        &format!("/api/super-admin/owners/{}", owner_a),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(blocked.body["related"]["students"], 1);
    assert_eq!(blocked.body["related"]["categories"], 0);

    let activated = send(
        &app,
        "PUT",
        &format!("/api/super-admin/owners/{}", owner_b),
        Some(&token),
        Some(json!({ "status": "active", "sms_amount": 50 })),
    )
    .await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(activated.body["status"], "active");
    assert_eq!(activated.body["sms_amount"], 50);

    let me = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.body["type"], "super_admin");
    assert_eq!(me.body["super_admin"]["username"], "root");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_token_cannot_reach_super_admin_routes(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    create_owner(&pool, &phone, "active").await;
    let token = owner_token(&app, &phone).await;

    let response = send(&app, "GET", "/api/super-admin/owners", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = hostelhub::hostelhub_auth::issue_super_admin_token(
        999,
        "Ghost",
        "ghost",
        &common::jwt_config(),
    )
    .unwrap();
    let me = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_skips_stale_owner_cookie(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use hostelhub::hostelhub_auth::{Claims, TokenType, sign_claims};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let app = setup_test_app(pool.clone());
    let owner_id = create_owner(&pool, &unique_phone(), "active").await;
    let phone = unique_phone();
    let student_id = create_student(&pool, owner_id, None, &phone, "secret1", "living").await;
    let student = student_token(&app, &phone, "secret1").await;

    let stale = sign_claims(
        &Claims {
            id: owner_id.into_inner(),
            token_type: TokenType::Admin,
            role: "admin".to_string(),
            name: "Test Owner".to_string(),
            phone: None,
            username: None,
            owner_id: None,
            iat: 2,
            exp: 3,
        },
        &common::jwt_config(),
    )
    .unwrap();

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("auth_token={stale}; student_token={student}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "student");
    assert_eq!(body["student"]["id"], student_id.into_inner());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_deletes_rows_without_dependents(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    create_super_admin(&pool, "root", "active").await;
    let token = super_admin_token(&app, "root").await;

    let owner_id = create_owner(&pool, &unique_phone(), "active").await;
    let student_id = create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;

    let student_uri = format!("/api/super-admin/students/{}", student_id);
    let response = send(&app, "DELETE", &student_uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let response = send(&app, "GET", &student_uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let owner_uri = format!("/api/super-admin/owners/{}", owner_id);
    let response = send(&app, "DELETE", &owner_uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Owner deleted successfully");
    let response = send(&app, "GET", &owner_uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
