//! Database initialization tests
//!
//! Covers first-run creation, reopening an existing file, and the
//! foreign-key behaviour the repository relies on (cascading deletes).

use sqlx::SqlitePool;
use tempfile::TempDir;
use wedlist_common::db::init::init_database;

async fn fresh_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("temp dir");
    let pool = init_database(&dir.path().join("wedlist.db"))
        .await
        .expect("database init");
    (dir, pool)
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("wedlist.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("wedlist.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let (_dir, pool) = fresh_db().await;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(
        tables,
        vec![
            "communication_logs",
            "guest_categories",
            "guests",
            "users",
            "weddings"
        ]
    );
}

#[tokio::test]
async fn test_wedding_delete_cascades_to_guests_and_categories() {
    let (_dir, pool) = fresh_db().await;

    sqlx::query("INSERT INTO users (id) VALUES ('u1')")
        .execute(&pool)
        .await
        .unwrap();
    let wedding_id: i64 = sqlx::query_scalar(
        "INSERT INTO weddings (user_id, bride_name, groom_name, wedding_date, venue, rsvp_code)
         VALUES ('u1', 'Sarah', 'Michael', '2025-06-01', 'Hall', 'sarah-michael-2025')
         RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO guest_categories (wedding_id, name) VALUES (?, 'Family')")
        .bind(wedding_id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO guests (wedding_id, first_name, last_name, phone) VALUES (?, 'Emily', 'Johnson', '555')",
    )
    .bind(wedding_id)
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM weddings WHERE id = ?")
        .bind(wedding_id)
        .execute(&pool)
        .await
        .unwrap();

    let guests: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
        .fetch_one(&pool)
        .await
        .unwrap();
    let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guest_categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(guests, 0);
    assert_eq!(categories, 0);
}

#[tokio::test]
async fn test_rsvp_code_column_is_unique() {
    let (_dir, pool) = fresh_db().await;

    sqlx::query("INSERT INTO users (id) VALUES ('u1')")
        .execute(&pool)
        .await
        .unwrap();
    let insert = "INSERT INTO weddings (user_id, bride_name, groom_name, wedding_date, venue, rsvp_code)
                  VALUES ('u1', 'A', 'B', '2025-01-01', 'V', 'a-b-2025')";

    sqlx::query(insert).execute(&pool).await.unwrap();
    let second = sqlx::query(insert).execute(&pool).await;
    assert!(second.is_err(), "Duplicate rsvp_code should be rejected");
}
