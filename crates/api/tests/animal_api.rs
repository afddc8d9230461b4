//! HTTP-level integration tests for the animal registry endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, put_json, staff_token};
use sqlx::PgPool;

/// Register an animal through the API and return the response body.
async fn register(
    pool: &PgPool,
    holding_id: i64,
    chip_number: &str,
    official_id: &str,
) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/animals",
        &staff_token(),
        serde_json::json!({
            "microchipNumber": chip_number,
            "officialId": official_id,
            "species": "Dog",
            "sex": "Male",
            "breed": "Alabai",
            "currentHoldingId": holding_id,
            "birthHoldingId": holding_id,
        }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_201_with_chip_and_manufacturer(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;

    let (status, json) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["officialId"], "UZ-1001");
    assert_eq!(json["data"]["microchipNumber"], "981200012345678");
    // Known directory chip resolves its manufacturer.
    assert_eq!(json["data"]["chip"]["manufacturer"], "HomeAgain");
    assert_eq!(json["data"]["chip"]["isActive"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_accepts_formatted_chip_number(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;

    // Scanners commonly emit separators; they are stripped on the way in.
    let (status, json) = register(&pool, holding_id, "981-2000-1234-5678", "UZ-1002").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["microchipNumber"], "981200012345678");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_malformed_chip_number(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;

    let (status, json) = register(&pool, holding_id, "12345", "UZ-1003").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_chip_returns_409(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;

    let (first, _) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, json) = register(&pool, holding_id, "981200012345678", "UZ-1002").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_official_id_returns_409(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;

    let (first, _) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, json) = register(&pool, holding_id, "981200012345679", "UZ-1001").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Search and get-by-id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_resolves_chip_number_and_official_id(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;
    register(&pool, holding_id, "981200012345678", "UZ-1001").await;

    // By chip number.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/animals?search=981200012345678",
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["officialId"], "UZ-1001");
    // Search responses omit movement history.
    assert!(json["data"].get("movements").is_none());

    // By official id.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/animals?search=UZ-1001", &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["officialId"], "UZ-1001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_unknown_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/animals?search=UZ-MISSING", &staff_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_animal_with_invalid_uuid_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/animals/not-a-uuid", &staff_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid animal ID format");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_animal_by_id_includes_movements(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;
    let (_, created) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    let animal_id = created["data"]["animalId"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/animals/{animal_id}"), &staff_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Direct id lookup always carries the movements array (possibly empty).
    assert!(json["data"]["movements"].is_array());
    assert_eq!(json["data"]["currentHolding"]["holdingName"], "Test Farm");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_only_present_fields(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;
    let (_, created) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    let animal_id = created["data"]["animalId"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/animals/{animal_id}"),
        &staff_token(),
        serde_json::json!({ "status": "Sold" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Sold");
    // Untouched fields survive the sparse patch.
    assert_eq!(json["data"]["breed"], "Alabai");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_empty_body_returns_400(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;
    let (_, created) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    let animal_id = created["data"]["animalId"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/animals/{animal_id}"),
        &staff_token(),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Medical records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_medical_record_returns_201_and_keeps_status(pool: PgPool) {
    let holding_id = common::seed_holding(&pool).await;
    let (_, created) = register(&pool, holding_id, "981200012345678", "UZ-1001").await;
    let animal_id = created["data"]["animalId"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/animals/{animal_id}/medical-records"),
        &staff_token(),
        serde_json::json!({
            "procedureDate": "2025-06-01",
            "holdingId": holding_id,
            "healthStatus": "Sick",
            "diagnosis": "Kennel cough",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    // The animal's own status is never derived from health records.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/animals/{animal_id}"), &staff_token()).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Alive");
    assert_eq!(json["data"]["healthRecords"][0]["diagnosis"], "Kennel cough");
}
