//! Database service for hotel-service.

use crate::config::AccountsConfig;
use crate::models::{
    CheckIn, CheckOut, CreateGuest, GlEntry, Guest, InvoiceStatus, Reservation, Room, RoomEvent,
    RoomStatus, RoomSummary, SalesInvoice,
};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// All stay and accounting records for one guest, read in a single
/// consistent snapshot.
#[derive(Debug, Clone)]
pub struct GuestLedgerSnapshot {
    pub gl_entries: Vec<GlEntry>,
    pub reservations: Vec<Reservation>,
    pub check_ins: Vec<CheckIn>,
    pub check_outs: Vec<CheckOut>,
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "hotel-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Guest Operations
    // -------------------------------------------------------------------------

    /// Register a guest. When the guest has no linked customer master yet,
    /// one is created in the given customer group within the same
    /// transaction, so a guest never exists half-registered.
    #[instrument(skip(self, input), fields(full_name = %input.full_name))]
    pub async fn create_guest(
        &self,
        input: &CreateGuest,
        customer_group: &str,
    ) -> Result<Guest, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_guest"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let customer_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO customers (customer_id, customer_name, customer_type, customer_group, territory)
            VALUES ($1, $2, 'Individual', $3, 'All Territories')
            "#,
        )
        .bind(customer_id)
        .bind(&input.full_name)
        .bind(customer_group)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create customer: {}", e)))?;

        let guest_id = Uuid::new_v4();
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            INSERT INTO guests (guest_id, full_name, email, phone, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING guest_id, full_name, email, phone, customer_id, created_utc
            "#,
        )
        .bind(guest_id)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(customer_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create guest: {}", e)))?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();

        info!(
            guest_id = %guest.guest_id,
            customer_id = %customer_id,
            "Guest registered with customer master"
        );

        Ok(guest)
    }

    /// Get a guest by ID.
    #[instrument(skip(self), fields(guest_id = %guest_id))]
    pub async fn get_guest(&self, guest_id: Uuid) -> Result<Option<Guest>, AppError> {
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            SELECT guest_id, full_name, email, phone, customer_id, created_utc
            FROM guests
            WHERE guest_id = $1
            "#,
        )
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get guest: {}", e)))?;

        Ok(guest)
    }

    // -------------------------------------------------------------------------
    // Stay Operations
    // -------------------------------------------------------------------------

    /// Get a check-in by ID.
    #[instrument(skip(self), fields(check_in_id = %check_in_id))]
    pub async fn get_check_in(&self, check_in_id: Uuid) -> Result<Option<CheckIn>, AppError> {
        let check_in = sqlx::query_as::<_, CheckIn>(
            r#"
            SELECT check_in_id, guest_id, reservation_id, room_number, check_in_date,
                   check_out_date, nights, total_charge, sales_invoice_id, created_utc
            FROM check_ins
            WHERE check_in_id = $1
            "#,
        )
        .bind(check_in_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get check-in: {}", e)))?;

        Ok(check_in)
    }

    /// Get a room by room number.
    #[instrument(skip(self), fields(room_number = %room_number))]
    pub async fn get_room_by_number(&self, room_number: &str) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT room_id, room_number, room_type, room_item, price, status, created_utc
            FROM rooms
            WHERE room_number = $1
            "#,
        )
        .bind(room_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get room: {}", e)))?;

        Ok(room)
    }

    /// Search rooms linked to a reservation, filtered by substring on the
    /// room id or room number.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn search_rooms_by_reservation(
        &self,
        reservation_id: Uuid,
        query: &str,
    ) -> Result<Vec<RoomSummary>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["search_rooms_by_reservation"])
            .start_timer();

        let pattern = format!("%{}%", query);
        let rooms = sqlx::query_as::<_, RoomSummary>(
            r#"
            SELECT r.room_id, r.room_number, r.room_type
            FROM rooms r
            INNER JOIN reservation_rooms rr ON r.room_id = rr.room_id
            WHERE rr.reservation_id = $1
              AND (r.room_id::text ILIKE $2 OR r.room_number ILIKE $2)
            ORDER BY r.room_number
            "#,
        )
        .bind(reservation_id)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to search rooms: {}", e)))?;

        timer.observe_duration();

        Ok(rooms)
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// Create and finalize a sales invoice for a check-in.
    ///
    /// Everything happens in one transaction: the invoice row, the paired
    /// receivable/income ledger postings, and — when `finalize_stay` is
    /// set — the invoice reference on the check-in plus the room's
    /// vacant→occupied transition. A failure anywhere rolls the whole
    /// operation back, leaving no invoice record behind.
    #[instrument(
        skip(self, check_in, room, accounts),
        fields(check_in_id = %check_in.check_in_id, room_number = %room.room_number)
    )]
    pub async fn create_sales_invoice(
        &self,
        check_in: &CheckIn,
        room: &Room,
        customer_id: Uuid,
        amount: Decimal,
        accounts: &AccountsConfig,
        finalize_stay: bool,
    ) -> Result<SalesInvoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_sales_invoice"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let invoice_id = Uuid::new_v4();
        let submitted_utc = Utc::now();

        let invoice = sqlx::query_as::<_, SalesInvoice>(
            r#"
            INSERT INTO sales_invoices
                (invoice_id, customer_id, posting_date, due_date, item_code, item_name,
                 description, qty, rate, amount, cost_center, status, submitted_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING invoice_id, customer_id, posting_date, due_date, item_code, item_name,
                      description, qty, rate, amount, cost_center, status, created_utc,
                      submitted_utc
            "#,
        )
        .bind(invoice_id)
        .bind(customer_id)
        .bind(check_in.check_in_date)
        .bind(check_in.check_out_date)
        .bind(&room.room_item)
        .bind(&room.room_item)
        .bind(check_in.check_in_id.to_string())
        .bind(Decimal::from(check_in.nights))
        .bind(room.price)
        .bind(amount)
        .bind(&accounts.cost_center)
        .bind(InvoiceStatus::Submitted.as_str())
        .bind(submitted_utc)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert invoice: {}", e)))?;

        // Finalizing the invoice posts the two ledger sides.
        for (account, debit, credit) in [
            (&accounts.receivable_account, Some(amount), None),
            (&accounts.income_account, None, Some(amount)),
        ] {
            sqlx::query(
                r#"
                INSERT INTO gl_entries
                    (entry_id, posting_date, account, debit, credit, voucher_type, voucher_no, customer_id)
                VALUES ($1, $2, $3, $4, $5, 'Sales Invoice', $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(check_in.check_in_date)
            .bind(account)
            .bind(debit)
            .bind(credit)
            .bind(invoice_id.to_string())
            .bind(customer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to post ledger entry: {}", e))
            })?;
        }

        if finalize_stay {
            sqlx::query("UPDATE check_ins SET sales_invoice_id = $1 WHERE check_in_id = $2")
                .bind(invoice_id)
                .bind(check_in.check_in_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to store invoice reference: {}",
                        e
                    ))
                })?;

            // Room transitions go through the explicit state machine; an
            // illegal transition aborts the whole invoice.
            let status: String =
                sqlx::query_scalar("SELECT status FROM rooms WHERE room_id = $1 FOR UPDATE")
                    .bind(room.room_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(anyhow::anyhow!("Failed to lock room: {}", e))
                    })?;

            let next = RoomStatus::from_string(&status)
                .transition(RoomEvent::InvoiceCreated)
                .ok_or_else(|| {
                    AppError::Conflict(anyhow::anyhow!(
                        "Room {} is already occupied",
                        room.room_number
                    ))
                })?;

            sqlx::query("UPDATE rooms SET status = $1 WHERE room_id = $2")
                .bind(next.as_str())
                .bind(room.room_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to update room status: {}", e))
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();

        info!(
            invoice_id = %invoice.invoice_id,
            amount = %amount,
            finalize_stay = finalize_stay,
            "Sales invoice created and submitted"
        );

        Ok(invoice)
    }

    // -------------------------------------------------------------------------
    // Reporting Operations
    // -------------------------------------------------------------------------

    /// Load everything the guest ledger view needs in one repeatable-read
    /// transaction: ledger postings ascending by posting date, and the
    /// three stay record sets each ordered most recent first. Returns
    /// `None` when the guest does not exist.
    #[instrument(skip(self), fields(guest_id = %guest_id))]
    pub async fn guest_ledger_snapshot(
        &self,
        guest_id: Uuid,
    ) -> Result<Option<GuestLedgerSnapshot>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["guest_ledger_snapshot"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to set isolation level: {}", e))
            })?;

        let guest = sqlx::query_as::<_, Guest>(
            "SELECT guest_id, full_name, email, phone, customer_id, created_utc FROM guests WHERE guest_id = $1",
        )
        .bind(guest_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get guest: {}", e)))?;

        let guest = match guest {
            Some(g) => g,
            None => {
                tx.rollback().await.ok();
                timer.observe_duration();
                return Ok(None);
            }
        };

        let gl_entries = match guest.customer_id {
            Some(customer_id) => sqlx::query_as::<_, GlEntry>(
                r#"
                SELECT entry_id, posting_date, account, debit, credit,
                       voucher_type, voucher_no, customer_id, created_utc
                FROM gl_entries
                WHERE customer_id = $1
                ORDER BY posting_date ASC, created_utc ASC
                "#,
            )
            .bind(customer_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to get ledger entries: {}", e))
            })?,
            None => Vec::new(),
        };

        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT reservation_id, guest_id, room_number, check_in_date, check_out_date, created_utc
            FROM reservations
            WHERE guest_id = $1
            ORDER BY check_in_date DESC
            "#,
        )
        .bind(guest_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get reservations: {}", e))
        })?;

        let check_ins = sqlx::query_as::<_, CheckIn>(
            r#"
            SELECT check_in_id, guest_id, reservation_id, room_number, check_in_date,
                   check_out_date, nights, total_charge, sales_invoice_id, created_utc
            FROM check_ins
            WHERE guest_id = $1
            ORDER BY check_in_date DESC
            "#,
        )
        .bind(guest_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get check-ins: {}", e)))?;

        let check_outs = sqlx::query_as::<_, CheckOut>(
            r#"
            SELECT check_out_id, check_in_id, guest_id, check_out_time, created_utc
            FROM check_outs
            WHERE guest_id = $1
            ORDER BY check_out_time DESC
            "#,
        )
        .bind(guest_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get check-outs: {}", e)))?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();

        Ok(Some(GuestLedgerSnapshot {
            gl_entries,
            reservations,
            check_ins,
            check_outs,
        }))
    }

    /// Ledger postings for a customer within a date range, ascending.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn gl_entries_for_customer(
        &self,
        customer_id: Uuid,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<GlEntry>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["gl_entries_for_customer"])
            .start_timer();

        let entries = sqlx::query_as::<_, GlEntry>(
            r#"
            SELECT entry_id, posting_date, account, debit, credit,
                   voucher_type, voucher_no, customer_id, created_utc
            FROM gl_entries
            WHERE customer_id = $1
              AND posting_date >= $2
              AND posting_date <= $3
            ORDER BY posting_date ASC, created_utc ASC
            "#,
        )
        .bind(customer_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get ledger entries: {}", e))
        })?;

        timer.observe_duration();

        Ok(entries)
    }
}
