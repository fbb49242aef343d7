#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    create_category, create_owner, create_student, owner_token, send, setup_test_app,
    unique_phone,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_cannot_see_other_tenants_rows(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let phone_a = unique_phone();
    let phone_b = unique_phone();
    let owner_a = create_owner(&pool, &phone_a, "active").await;
    let owner_b = create_owner(&pool, &phone_b, "active").await;

    let category_a = create_category(&pool, owner_a, 3000, 500).await;
    let student_a =
        create_student(&pool, owner_a, Some(category_a), &unique_phone(), "x", "living").await;
    create_student(&pool, owner_b, None, &unique_phone(), "x", "living").await;

    let token_b = owner_token(&app, &phone_b).await;

    let list = send(&app, "GET", "/api/students", Some(&token_b), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["meta"]["total"], 1);
    assert!(
        list.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["owner_id"] == owner_b.into_inner())
    );

    let uri = format!("/api/students/{}", student_a);
    assert_eq!(
        send(&app, "GET", &uri, Some(&token_b), None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&app, "PUT", &uri, Some(&token_b), Some(json!({ "name": "Hijack" })))
            .await
            .status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&app, "DELETE", &uri, Some(&token_b), None).await.status,
        StatusCode::NOT_FOUND
    );

    let category_uri = format!("/api/categories/{}", category_a);
    assert_eq!(
        send(&app, "GET", &category_uri, Some(&token_b), None)
            .await
            .status,
        StatusCode::NOT_FOUND
    );

    // A foreign category cannot be attached to one's own student
    let response = send(
        &app,
        "POST",
        "/api/students",
        Some(&token_b),
        Some(json!({
            "name": "Karim",
            "phone": unique_phone(),
            "password": "secret1",
            "category_id": category_a.into_inner()
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let name: String = sqlx::query_scalar("SELECT name FROM students WHERE id = $1")
        .bind(student_a)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Test Student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_create_hashes_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let category_id = create_category(&pool, owner_id, 2500, 0).await;
    let token = owner_token(&app, &phone).await;

    let student_phone = unique_phone();
    let response = send(
        &app,
        "POST",
        "/api/students",
        Some(&token),
        Some(json!({
            "name": "Karim",
            "phone": student_phone,
            "password": "secret1",
            "category_id": category_id.into_inner()
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["owner_id"], owner_id.into_inner());
    assert_eq!(response.body["category_title"], "Double room");
    assert_eq!(response.body["status"], "living");
    assert!(response.body.get("password").is_none());

    let stored: String = sqlx::query_scalar("SELECT password FROM students WHERE phone = $1")
        .bind(&student_phone)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$2"));

    let duplicate = send(
        &app,
        "POST",
        "/api/students",
        Some(&token),
        Some(json!({ "name": "Other", "phone": student_phone, "password": "secret1" })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_is_stable_and_disjoint(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    for _ in 0..7 {
        create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;
    }
    let token = owner_token(&app, &phone).await;

    let first = send(&app, "GET", "/api/students?page=1&page_size=3", Some(&token), None).await;
    let again = send(&app, "GET", "/api/students?page=1&page_size=3", Some(&token), None).await;
    assert_eq!(first.body["data"], again.body["data"]);

    assert_eq!(first.body["meta"]["total"], 7);
    assert_eq!(first.body["meta"]["total_pages"], 3);
    assert_eq!(first.body["meta"]["has_more"], true);

    let last = send(&app, "GET", "/api/students?page=3&page_size=3", Some(&token), None).await;
    assert_eq!(last.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(last.body["meta"]["has_more"], false);

    let mut ids = Vec::new();
    for page in 1..=3 {
        let uri = format!("/api/students?page={page}&page_size=3");
        let response = send(&app, "GET", &uri, Some(&token), None).await;
        for student in response.body["data"].as_array().unwrap() {
            ids.push(student["id"].as_i64().unwrap());
        }
    }
    let mut sorted = ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted.dedup();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 7);

    // Unparseable paging falls back to defaults
    let fallback = send(&app, "GET", "/api/students?page=x&page_size=", Some(&token), None).await;
    assert_eq!(fallback.status, StatusCode::OK);
    assert_eq!(fallback.body["meta"]["page"], 1);
    assert_eq!(fallback.body["meta"]["page_size"], 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_and_status_filters(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let living = create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;
    create_student(&pool, owner_id, None, &unique_phone(), "x", "leave").await;
    sqlx::query("UPDATE students SET name = 'Nazmul 100%' WHERE id = $1")
        .bind(living)
        .execute(&pool)
        .await
        .unwrap();
    let token = owner_token(&app, &phone).await;

    let leave = send(&app, "GET", "/api/students?status=leave", Some(&token), None).await;
    assert_eq!(leave.body["meta"]["total"], 1);
    assert_eq!(leave.body["data"][0]["status"], "leave");

    let search = send(&app, "GET", "/api/students?search=nazmul", Some(&token), None).await;
    assert_eq!(search.body["meta"]["total"], 1);
    assert_eq!(search.body["data"][0]["id"], living.into_inner());

    // `%` is matched literally
    let literal = send(&app, "GET", "/api/students?search=%25", Some(&token), None).await;
    assert_eq!(literal.body["meta"]["total"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_with_dependents_is_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let category_id = create_category(&pool, owner_id, 3000, 0).await;
    let student_id =
        create_student(&pool, owner_id, Some(category_id), &unique_phone(), "x", "living").await;
    let token = owner_token(&app, &phone).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/api/categories/{}", category_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["related"]["students"], 1);
    assert_eq!(response.body["related"]["rents"], 0);

    let generated = send(&app, "POST", "/api/rents/generate", Some(&token), None).await;
    assert_eq!(generated.body["created"], 1);

    let response = send(
        &app,
        "DELETE",
        &format!("/api/students/{}", student_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["related"]["rents"], 1);
    assert_eq!(response.body["related"]["payments"], 0);

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
        .bind(student_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(exists);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_crud(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    create_owner(&pool, &phone, "active").await;
    let token = owner_token(&app, &phone).await;

    let created = send(
        &app,
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({ "title": "Single", "rent_amount": 4000 })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["external_amount"], 0);
    let uri = format!("/api/categories/{}", created.body["id"]);

    let updated = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "external_amount": 300 })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "Single");
    assert_eq!(updated.body["external_amount"], 300);

    let deleted = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lists_stay_inside_tenant_across_many_owners(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let mut tenants = Vec::new();

    for n in 1..=4_i64 {
        let phone = unique_phone();
        let owner_id = create_owner(&pool, &phone, "active").await;
        let category_id = create_category(&pool, owner_id, 1000 * n, 0).await;
        for _ in 0..n {
            create_student(&pool, owner_id, Some(category_id), &unique_phone(), "x", "living")
                .await;
        }
        let token = owner_token(&app, &phone).await;
        let generated = send(&app, "POST", "/api/rents/generate", Some(&token), None).await;
        assert_eq!(generated.body["created"], n);
        tenants.push((owner_id, token, n));
    }

    for (owner_id, token, n) in &tenants {
        for uri in ["/api/students?page_size=100", "/api/rents?page_size=100", "/api/categories"] {
            let response = send(&app, "GET", uri, Some(token), None).await;
            assert_eq!(response.status, StatusCode::OK);
            let rows = response.body["data"].as_array().unwrap();
            assert!(
                rows.iter().all(|row| row["owner_id"] == owner_id.into_inner()),
                "{uri} leaked rows of another tenant"
            );
        }

        let current = send(&app, "GET", "/api/rent/current", Some(token), None).await;
        assert_eq!(current.body["summary"]["total_students"], *n);
        assert_eq!(current.body["summary"]["total_rent"], 1000 * n * n);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_without_dependents(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let student_id = create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;
    let token = owner_token(&app, &phone).await;
    let uri = format!("/api/students/{}", student_id);

    let response = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Student deleted successfully");

    let response = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_counts_rent_inserted_concurrently(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    let student_id = create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;
    let token = owner_token(&app, &phone).await;

    // Uncommitted rent holding a key-share lock on the student row
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("INSERT INTO rents (owner_id, student_id, rent_amount) VALUES ($1, $2, 1000)")
        .bind(owner_id)
        .bind(student_id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let delete = tokio::spawn({
        let app = app.clone();
        let uri = format!("/api/students/{}", student_id);
        async move { send(&app, "DELETE", &uri, Some(&token), None).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    tx.commit().await.unwrap();

    let response = delete.await.unwrap();
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["related"]["rents"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_huge_page_is_an_empty_page(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let phone = unique_phone();
    let owner_id = create_owner(&pool, &phone, "active").await;
    create_student(&pool, owner_id, None, &unique_phone(), "x", "living").await;
    let token = owner_token(&app, &phone).await;

    for uri in [
        "/api/students?page=9223372036854775807&page_size=100",
        "/api/rent/current?page=9223372036854775807&page_size=100",
        "/api/payments?page=9223372036854775807",
    ] {
        let response = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
        assert_eq!(response.body["meta"]["has_more"], false);
    }
}
