//! Pizza type CRUD operations.

use billing::MergeNonEmpty;
use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;

use crate::{
    models::{advance_timestamp, NewPizzaType, PizzaType, PizzaTypeChanges},
    repository::pizza_toppings,
    DbError,
};

/// Return every pizza type.
pub async fn list_pizza_types(pool: &PgPool) -> Result<Vec<PizzaType>, DbError> {
    let rows = sqlx::query_as::<_, PizzaType>(
        r#"
        SELECT pizza_type_id, name, size, base_price, description, created_at, updated_at
        FROM pizza_types
        ORDER BY created_at, pizza_type_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a new pizza type under the client-supplied identifier.
pub async fn create_pizza_type(pool: &PgPool, new: NewPizzaType) -> Result<PizzaType, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, PizzaType>(
        r#"
        INSERT INTO pizza_types
            (pizza_type_id, name, size, base_price, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING pizza_type_id, name, size, base_price, description, created_at, updated_at
        "#,
    )
    .bind(new.pizza_type_id)
    .bind(new.name)
    .bind(new.size)
    .bind(new.base_price)
    .bind(new.description)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(pizza_type_id = %row.pizza_type_id, "pizza type created");
    Ok(row)
}

/// Merge the non-blank fields of `changes` into the stored pizza type.
///
/// Returns `DbError::NotFound` if no pizza type has this id.
pub async fn update_pizza_type(
    pool: &PgPool,
    pizza_type_id: &str,
    changes: PizzaTypeChanges,
) -> Result<PizzaType, DbError> {
    let mut tx = pool.begin().await?;

    let mut pizza = sqlx::query_as::<_, PizzaType>(
        r#"
        SELECT pizza_type_id, name, size, base_price, description, created_at, updated_at
        FROM pizza_types
        WHERE pizza_type_id = $1
        FOR UPDATE
        "#,
    )
    .bind(pizza_type_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("pizza type", pizza_type_id))?;

    pizza.merge_non_empty(changes);
    pizza.updated_at = advance_timestamp(pizza.updated_at);

    let row = sqlx::query_as::<_, PizzaType>(
        r#"
        UPDATE pizza_types
        SET name = $1, size = $2, base_price = $3, description = $4, updated_at = $5
        WHERE pizza_type_id = $6
        RETURNING pizza_type_id, name, size, base_price, description, created_at, updated_at
        "#,
    )
    .bind(&pizza.name)
    .bind(&pizza.size)
    .bind(pizza.base_price)
    .bind(&pizza.description)
    .bind(pizza.updated_at)
    .bind(pizza_type_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Delete a pizza type together with its topping links.
pub async fn delete_pizza_type(pool: &PgPool, pizza_type_id: &str) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let unlinked = pizza_toppings::unlink_pizza_type(&mut *tx, pizza_type_id).await?;
    let result = sqlx::query("DELETE FROM pizza_types WHERE pizza_type_id = $1")
        .bind(pizza_type_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(
        pizza_type_id,
        unlinked,
        deleted = result.rows_affected(),
        "pizza type deleted"
    );
    Ok(())
}

/// Whether a pizza type with this id exists.
pub async fn pizza_type_exists<'e, E>(executor: E, pizza_type_id: &str) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM pizza_types WHERE pizza_type_id = $1)",
    )
    .bind(pizza_type_id)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}
