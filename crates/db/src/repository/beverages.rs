//! Beverage CRUD operations. Beverages are not linked to anything.

use billing::MergeNonEmpty;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    models::{advance_timestamp, Beverage, BeverageChanges, NewBeverage},
    DbError,
};

/// Return every beverage.
pub async fn list_beverages(pool: &PgPool) -> Result<Vec<Beverage>, DbError> {
    let rows = sqlx::query_as::<_, Beverage>(
        r#"
        SELECT beverage_id, name, price, created_at, updated_at
        FROM beverages
        ORDER BY created_at, beverage_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a new beverage under the client-supplied identifier.
pub async fn create_beverage(pool: &PgPool, new: NewBeverage) -> Result<Beverage, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Beverage>(
        r#"
        INSERT INTO beverages (beverage_id, name, price, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING beverage_id, name, price, created_at, updated_at
        "#,
    )
    .bind(new.beverage_id)
    .bind(new.name)
    .bind(new.price)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(beverage_id = %row.beverage_id, "beverage created");
    Ok(row)
}

/// Merge the non-blank fields of `changes` into the stored beverage.
pub async fn update_beverage(
    pool: &PgPool,
    beverage_id: &str,
    changes: BeverageChanges,
) -> Result<Beverage, DbError> {
    let mut tx = pool.begin().await?;

    let mut beverage = sqlx::query_as::<_, Beverage>(
        r#"
        SELECT beverage_id, name, price, created_at, updated_at
        FROM beverages
        WHERE beverage_id = $1
        FOR UPDATE
        "#,
    )
    .bind(beverage_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("beverage", beverage_id))?;

    beverage.merge_non_empty(changes);
    beverage.updated_at = advance_timestamp(beverage.updated_at);

    let row = sqlx::query_as::<_, Beverage>(
        r#"
        UPDATE beverages
        SET name = $1, price = $2, updated_at = $3
        WHERE beverage_id = $4
        RETURNING beverage_id, name, price, created_at, updated_at
        "#,
    )
    .bind(&beverage.name)
    .bind(beverage.price)
    .bind(beverage.updated_at)
    .bind(beverage_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Permanently delete a beverage by its primary key.
///
/// Deleting an unknown id is not an error.
pub async fn delete_beverage(pool: &PgPool, beverage_id: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM beverages WHERE beverage_id = $1")
        .bind(beverage_id)
        .execute(pool)
        .await?;

    debug!(beverage_id, deleted = result.rows_affected(), "beverage deleted");
    Ok(())
}
