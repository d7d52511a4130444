//! Bootstrap idempotency tests.
//!
//! `Application::build` runs the bootstrap once as part of the test
//! harness setup, so these tests verify the state it leaves behind and
//! that running it again changes nothing.

mod common;

use common::TestApp;
use hotel_service::config::BootstrapConfig;
use hotel_service::services::setup;

#[tokio::test]
async fn bootstrap_creates_groups_and_catalog() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let customer_groups: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM customer_groups WHERE group_name = 'Hotel Customers'")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(customer_groups, 1);

    let item_groups: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM item_groups WHERE group_name = 'Hotel Rooms'")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(item_groups, 1);

    let items: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE item_group = 'Hotel Rooms'")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(items, 3);

    app.cleanup().await;
}

#[tokio::test]
async fn rerunning_bootstrap_changes_nothing() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    // Preexisting records must be left untouched, including an item the
    // operator renamed after install.
    sqlx::query("UPDATE items SET item_name = 'Honeymoon Suite' WHERE item_code = 'Suite'")
        .execute(app.db.pool())
        .await
        .unwrap();

    setup::ensure_defaults(&app.db, &BootstrapConfig::default())
        .await
        .expect("Bootstrap rerun failed");

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(items, 3);

    let renamed: String =
        sqlx::query_scalar("SELECT item_name FROM items WHERE item_code = 'Suite'")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(renamed, "Honeymoon Suite");

    let customer_groups: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_groups")
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(customer_groups, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn bootstrap_skips_catalog_when_disabled() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    sqlx::query("DELETE FROM items").execute(app.db.pool()).await.unwrap();

    let config = BootstrapConfig {
        seed_default_items: false,
        ..BootstrapConfig::default()
    };
    setup::ensure_defaults(&app.db, &config)
        .await
        .expect("Bootstrap failed");

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(items, 0);

    app.cleanup().await;
}
