//! Install-time bootstrap: classification groups and the default room
//! catalog. Every step is idempotent — records that already exist are
//! left untouched, so the bootstrap can run on every startup.

use crate::config::BootstrapConfig;
use crate::services::Database;
use service_core::error::AppError;
use tracing::{info, instrument};

const DEFAULT_ROOM_ITEMS: [(&str, &str); 3] = [
    ("Standard Room", "Standard hotel room with basic amenities"),
    ("Deluxe Room", "Deluxe room with enhanced amenities"),
    ("Suite", "Luxury suite with premium amenities"),
];

/// Ensure the classification groups exist and optionally seed the default
/// room-type catalog items.
#[instrument(skip(db, config))]
pub async fn ensure_defaults(db: &Database, config: &BootstrapConfig) -> Result<(), AppError> {
    ensure_customer_group(db, &config.customer_group).await?;
    ensure_item_group(db, &config.item_group).await?;

    if config.seed_default_items {
        seed_default_items(db, &config.item_group).await?;
    }

    info!(
        customer_group = %config.customer_group,
        item_group = %config.item_group,
        "Bootstrap defaults ensured"
    );

    Ok(())
}

async fn ensure_customer_group(db: &Database, group_name: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO customer_groups (group_name, parent_group, is_group)
        VALUES ($1, 'All Customer Groups', FALSE)
        ON CONFLICT (group_name) DO NOTHING
        "#,
    )
    .bind(group_name)
    .execute(db.pool())
    .await
    .map_err(|e| {
        AppError::DatabaseError(anyhow::anyhow!(
            "Failed to create customer group '{}': {}",
            group_name,
            e
        ))
    })?;

    if result.rows_affected() > 0 {
        info!(group_name = group_name, "Created customer group");
    }

    Ok(())
}

async fn ensure_item_group(db: &Database, group_name: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO item_groups (group_name, parent_group, is_group)
        VALUES ($1, 'All Item Groups', FALSE)
        ON CONFLICT (group_name) DO NOTHING
        "#,
    )
    .bind(group_name)
    .execute(db.pool())
    .await
    .map_err(|e| {
        AppError::DatabaseError(anyhow::anyhow!(
            "Failed to create item group '{}': {}",
            group_name,
            e
        ))
    })?;

    if result.rows_affected() > 0 {
        info!(group_name = group_name, "Created item group");
    }

    Ok(())
}

async fn seed_default_items(db: &Database, item_group: &str) -> Result<(), AppError> {
    for (item_code, description) in DEFAULT_ROOM_ITEMS {
        let result = sqlx::query(
            r#"
            INSERT INTO items (item_code, item_name, item_group, description, is_service_item, is_sales_item)
            VALUES ($1, $1, $2, $3, TRUE, TRUE)
            ON CONFLICT (item_code) DO NOTHING
            "#,
        )
        .bind(item_code)
        .bind(item_group)
        .bind(description)
        .execute(db.pool())
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Failed to create default item '{}': {}",
                item_code,
                e
            ))
        })?;

        if result.rows_affected() > 0 {
            info!(item_code = item_code, "Created default catalog item");
        }
    }

    Ok(())
}
