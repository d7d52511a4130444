//! Test helper module for hotel-service integration tests.
//!
//! Provides common setup utilities for PostgreSQL-based tests. Tests are
//! skipped (returning early) when `TEST_DATABASE_URL` is not set.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use hotel_service::config::{
    AccountsConfig, BootstrapConfig, DatabaseConfig, HotelConfig, LocaleConfig,
};
use hotel_service::services::Database;
use hotel_service::startup::Application;
use rust_decimal::Decimal;
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

// Counter for unique schema names
static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generate a unique schema name for test isolation.
fn unique_schema_name() -> String {
    let counter = SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("test_hotel_{}_{}", std::process::id(), counter)
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Database,
    pub client: reqwest::Client,
    schema_name: String,
}

impl TestApp {
    /// Spawn a new test application on a random port, in its own schema.
    /// Returns `None` (and logs) when no test database is configured.
    pub async fn spawn() -> Option<Self> {
        let base_url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set, skipping database-backed test");
                return None;
            }
        };

        let schema_name = unique_schema_name();

        // Create schema for test isolation
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&base_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema_name))
            .execute(&pool)
            .await
            .ok();
        sqlx::query(&format!("CREATE SCHEMA {}", schema_name))
            .execute(&pool)
            .await
            .expect("Failed to create test schema");

        pool.close().await;

        let separator = if base_url.contains('?') { "&" } else { "?" };
        let db_url_with_schema = format!(
            "{}{}options=-c search_path%3D{}",
            base_url, separator, schema_name
        );

        let config = HotelConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            service_name: "hotel-service-test".to_string(),
            log_level: "warn".to_string(),
            otlp_endpoint: None,
            database: DatabaseConfig {
                url: db_url_with_schema.clone(),
                max_connections: 5,
                min_connections: 1,
            },
            accounts: AccountsConfig::default(),
            locale: LocaleConfig::default(),
            bootstrap: BootstrapConfig::default(),
        };

        // Runs migrations and the idempotent bootstrap in the fresh schema.
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = Database::new(&db_url_with_schema, 5, 1)
            .await
            .expect("Failed to create test database handle");

        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        Some(TestApp {
            address,
            port,
            db,
            client,
            schema_name,
        })
    }

    /// Register a guest through the API; returns (guest_id, customer_id).
    pub async fn create_guest(&self, full_name: &str) -> (Uuid, Uuid) {
        let response = self
            .client
            .post(format!("{}/guests", self.address))
            .json(&serde_json::json!({ "full_name": full_name }))
            .send()
            .await
            .expect("Failed to call POST /guests");
        assert_eq!(response.status().as_u16(), 201);

        let body: serde_json::Value = response.json().await.expect("Invalid guest response");
        let guest_id = body["guest_id"].as_str().unwrap().parse().unwrap();
        let customer_id = body["customer_id"].as_str().unwrap().parse().unwrap();
        (guest_id, customer_id)
    }

    /// Insert a vacant room backed by one of the seeded catalog items.
    pub async fn insert_room(&self, room_number: &str, room_item: &str, price: i64) -> Uuid {
        let room_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO rooms (room_id, room_number, room_type, room_item, price, status)
            VALUES ($1, $2, $3, $3, $4, 'vacant')
            "#,
        )
        .bind(room_id)
        .bind(room_number)
        .bind(room_item)
        .bind(Decimal::from(price))
        .execute(self.db.pool())
        .await
        .expect("Failed to insert room");
        room_id
    }

    pub async fn insert_reservation(
        &self,
        guest_id: Uuid,
        room_number: &str,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> Uuid {
        let reservation_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO reservations (reservation_id, guest_id, room_number, check_in_date, check_out_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reservation_id)
        .bind(guest_id)
        .bind(room_number)
        .bind(check_in_date)
        .bind(check_out_date)
        .execute(self.db.pool())
        .await
        .expect("Failed to insert reservation");
        reservation_id
    }

    pub async fn link_reservation_room(&self, reservation_id: Uuid, room_id: Uuid) {
        sqlx::query("INSERT INTO reservation_rooms (reservation_id, room_id) VALUES ($1, $2)")
            .bind(reservation_id)
            .bind(room_id)
            .execute(self.db.pool())
            .await
            .expect("Failed to link reservation room");
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_check_in(
        &self,
        guest_id: Uuid,
        reservation_id: Option<Uuid>,
        room_number: &str,
        check_in_date: NaiveDate,
        nights: i32,
        total_charge: i64,
    ) -> Uuid {
        let check_in_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO check_ins
                (check_in_id, guest_id, reservation_id, room_number, check_in_date, nights, total_charge)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(check_in_id)
        .bind(guest_id)
        .bind(reservation_id)
        .bind(room_number)
        .bind(check_in_date)
        .bind(nights)
        .bind(Decimal::from(total_charge))
        .execute(self.db.pool())
        .await
        .expect("Failed to insert check-in");
        check_in_id
    }

    pub async fn insert_check_out(
        &self,
        check_in_id: Uuid,
        guest_id: Uuid,
        check_out_time: DateTime<Utc>,
    ) -> Uuid {
        let check_out_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO check_outs (check_out_id, check_in_id, guest_id, check_out_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(check_out_id)
        .bind(check_in_id)
        .bind(guest_id)
        .bind(check_out_time)
        .execute(self.db.pool())
        .await
        .expect("Failed to insert check-out");
        check_out_id
    }

    pub async fn insert_gl_entry(
        &self,
        customer_id: Uuid,
        posting_date: NaiveDate,
        account: &str,
        debit: Option<i64>,
        credit: Option<i64>,
    ) {
        sqlx::query(
            r#"
            INSERT INTO gl_entries
                (entry_id, posting_date, account, debit, credit, voucher_type, voucher_no, customer_id)
            VALUES ($1, $2, $3, $4, $5, 'Journal Entry', $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(posting_date)
        .bind(account)
        .bind(debit.map(Decimal::from))
        .bind(credit.map(Decimal::from))
        .bind(Uuid::new_v4().to_string())
        .bind(customer_id)
        .execute(self.db.pool())
        .await
        .expect("Failed to insert gl entry");
    }

    /// Cleanup test resources (schema).
    pub async fn cleanup(&self) {
        if let Ok(base_url) = std::env::var("TEST_DATABASE_URL") {
            if let Ok(pool) = sqlx::postgres::PgPoolOptions::new()
                .max_connections(1)
                .connect(&base_url)
                .await
            {
                let _ = sqlx::query(&format!(
                    "DROP SCHEMA IF EXISTS {} CASCADE",
                    self.schema_name
                ))
                .execute(&pool)
                .await;
                pool.close().await;
            }
        }
    }
}
