//! Topping CRUD operations.

use billing::MergeNonEmpty;
use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;

use crate::{
    models::{advance_timestamp, NewTopping, Topping, ToppingChanges},
    repository::pizza_toppings,
    DbError,
};

/// Return every topping.
pub async fn list_toppings(pool: &PgPool) -> Result<Vec<Topping>, DbError> {
    let rows = sqlx::query_as::<_, Topping>(
        r#"
        SELECT topping_id, name, price, created_at, updated_at
        FROM toppings
        ORDER BY created_at, topping_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a new topping under the client-supplied identifier.
pub async fn create_topping(pool: &PgPool, new: NewTopping) -> Result<Topping, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Topping>(
        r#"
        INSERT INTO toppings (topping_id, name, price, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING topping_id, name, price, created_at, updated_at
        "#,
    )
    .bind(new.topping_id)
    .bind(new.name)
    .bind(new.price)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(topping_id = %row.topping_id, "topping created");
    Ok(row)
}

/// Merge the non-blank fields of `changes` into the stored topping.
pub async fn update_topping(
    pool: &PgPool,
    topping_id: &str,
    changes: ToppingChanges,
) -> Result<Topping, DbError> {
    let mut tx = pool.begin().await?;

    let mut topping = sqlx::query_as::<_, Topping>(
        r#"
        SELECT topping_id, name, price, created_at, updated_at
        FROM toppings
        WHERE topping_id = $1
        FOR UPDATE
        "#,
    )
    .bind(topping_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("topping", topping_id))?;

    topping.merge_non_empty(changes);
    topping.updated_at = advance_timestamp(topping.updated_at);

    let row = sqlx::query_as::<_, Topping>(
        r#"
        UPDATE toppings
        SET name = $1, price = $2, updated_at = $3
        WHERE topping_id = $4
        RETURNING topping_id, name, price, created_at, updated_at
        "#,
    )
    .bind(&topping.name)
    .bind(topping.price)
    .bind(topping.updated_at)
    .bind(topping_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Delete a topping together with every pizza type link to it.
pub async fn delete_topping(pool: &PgPool, topping_id: &str) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let unlinked = pizza_toppings::unlink_topping(&mut *tx, topping_id).await?;
    let result = sqlx::query("DELETE FROM toppings WHERE topping_id = $1")
        .bind(topping_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(
        topping_id,
        unlinked,
        deleted = result.rows_affected(),
        "topping deleted"
    );
    Ok(())
}

/// Whether a topping with this id exists.
pub async fn topping_exists<'e, E>(executor: E, topping_id: &str) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM toppings WHERE topping_id = $1)",
    )
    .bind(topping_id)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}
