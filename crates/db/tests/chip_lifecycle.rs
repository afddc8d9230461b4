//! Integration tests for the chip assignment state machine.
//!
//! Per chip number the lifecycle is
//! `Unbound -> Active(animal=X) -> Inactive -> Active(animal=Y)`:
//! - Assigning a fresh number binds it active
//! - An active chip is never silently stolen (conflict both ways)
//! - Deactivation is explicit and not repeatable
//! - An inactive chip can be rebound to a different animal

use assert_matches::assert_matches;
use petchip_core::error::CoreError;
use petchip_db::error::DbError;
use petchip_db::models::chip::{AssignChip, AssignOutcome};
use petchip_db::repositories::ChipRepo;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_holding(pool: &PgPool) -> i64 {
    let area_id: i64 = sqlx::query_scalar(
        "INSERT INTO administrative_areas (area_name, area_type, code) \
         VALUES ('Test Region', 'Region', 'TR-01') RETURNING area_id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        "INSERT INTO holdings (holding_name, holding_type, owner_name, area_id) \
         VALUES ('Test Farm', 'Farm', 'Test Owner', $1) RETURNING holding_id",
    )
    .bind(area_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_animal(pool: &PgPool, holding_id: i64, official_id: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO animals (official_id, species, sex, current_holding_id, birth_holding_id) \
         VALUES ($1, 'Dog', 'Male', $2, $2) RETURNING animal_id",
    )
    .bind(official_id)
    .bind(holding_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

fn assignment(chip_number: &str) -> AssignChip {
    AssignChip {
        chip_number: chip_number.to_string(),
        // The repository takes the parsed animal id separately; this raw
        // field only matters to the HTTP handler.
        animal_id: String::new(),
        implantation_date: None,
        implanter_id: Some("Dr. Karimov".to_string()),
        holding_id: None,
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fresh_chip_is_assigned_active(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let animal_id = seed_animal(&pool, holding_id, "UZ-1001").await;

    let (outcome, chip) = ChipRepo::assign(
        &pool,
        animal_id,
        &assignment("981200012345678"),
        Some("HomeAgain"),
    )
    .await
    .unwrap();

    assert_eq!(outcome, AssignOutcome::Assigned);
    assert!(chip.is_active);
    assert_eq!(chip.animal_id, Some(animal_id));
    assert_eq!(chip.manufacturer.as_deref(), Some("HomeAgain"));
    assert_eq!(chip.implanted_by.as_deref(), Some("Dr. Karimov"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_chip_conflicts_for_same_animal(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let animal_id = seed_animal(&pool, holding_id, "UZ-1001").await;

    ChipRepo::assign(&pool, animal_id, &assignment("981200012345678"), None)
        .await
        .unwrap();

    let err = ChipRepo::assign(&pool, animal_id, &assignment("981200012345678"), None)
        .await
        .unwrap_err();

    let DbError::Core(CoreError::Conflict(message)) = err else {
        panic!("expected a conflict, got {err:?}");
    };
    assert!(message.contains("already assigned to this animal"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_chip_conflicts_for_another_animal(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let first = seed_animal(&pool, holding_id, "UZ-1001").await;
    let second = seed_animal(&pool, holding_id, "UZ-1002").await;

    ChipRepo::assign(&pool, first, &assignment("981200012345678"), None)
        .await
        .unwrap();

    let err = ChipRepo::assign(&pool, second, &assignment("981200012345678"), None)
        .await
        .unwrap_err();

    let DbError::Core(CoreError::Conflict(message)) = err else {
        panic!("expected a conflict, got {err:?}");
    };
    assert!(message.contains("already assigned to another animal"));

    // The original binding is untouched.
    let chip = ChipRepo::find_by_number(&pool, "981200012345678")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(chip.animal_id, Some(first));
}

// ---------------------------------------------------------------------------
// Deactivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivate_flips_active_off(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let animal_id = seed_animal(&pool, holding_id, "UZ-1001").await;
    ChipRepo::assign(&pool, animal_id, &assignment("981200012345678"), None)
        .await
        .unwrap();

    let chip = ChipRepo::deactivate(&pool, "981200012345678", Some("chip failure"))
        .await
        .unwrap();

    assert!(!chip.is_active);
    // The binding is kept for history; only the active flag changes.
    assert_eq!(chip.animal_id, Some(animal_id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivate_twice_is_a_validation_error(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let animal_id = seed_animal(&pool, holding_id, "UZ-1001").await;
    ChipRepo::assign(&pool, animal_id, &assignment("981200012345678"), None)
        .await
        .unwrap();

    ChipRepo::deactivate(&pool, "981200012345678", None)
        .await
        .unwrap();
    let err = ChipRepo::deactivate(&pool, "981200012345678", None)
        .await
        .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivate_unknown_chip_is_not_found(pool: PgPool) {
    let err = ChipRepo::deactivate(&pool, "000000000000001", None)
        .await
        .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Reassignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_chip_is_rebound_to_a_new_animal(pool: PgPool) {
    let holding_id = seed_holding(&pool).await;
    let first = seed_animal(&pool, holding_id, "UZ-1001").await;
    let second = seed_animal(&pool, holding_id, "UZ-1002").await;

    ChipRepo::assign(&pool, first, &assignment("981200012345678"), Some("PetLink"))
        .await
        .unwrap();
    ChipRepo::deactivate(&pool, "981200012345678", None)
        .await
        .unwrap();

    let mut input = assignment("981200012345678");
    input.implanter_id = None;
    let (outcome, chip) = ChipRepo::assign(&pool, second, &input, None).await.unwrap();

    assert_eq!(outcome, AssignOutcome::Reassigned);
    assert!(chip.is_active);
    assert_eq!(chip.animal_id, Some(second));
    // Fields not supplied on reassignment fall back to the stored values.
    assert_eq!(chip.manufacturer.as_deref(), Some("PetLink"));
    assert_eq!(chip.implanted_by.as_deref(), Some("Dr. Karimov"));

    // Still exactly one row for this physical chip.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chips WHERE chip_number = $1")
        .bind("981200012345678")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
