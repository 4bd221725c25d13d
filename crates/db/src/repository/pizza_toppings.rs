//! Pizza type ↔ topping links (`pizza_toppings` join table).

use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::{
    models::PizzaTopping,
    repository::{pizza_types::pizza_type_exists, toppings::topping_exists},
    DbError,
};

/// Link a topping to a pizza type.
///
/// Both rows must exist; otherwise `DbError::MissingReference` is returned
/// and nothing is inserted. Linking an already linked pair is a no-op.
pub async fn link_topping(
    pool: &PgPool,
    pizza_type_id: &str,
    topping_id: &str,
) -> Result<PizzaTopping, DbError> {
    let mut tx = pool.begin().await?;

    if !pizza_type_exists(&mut *tx, pizza_type_id).await? {
        return Err(DbError::MissingReference {
            resource: "Pizza type",
        });
    }
    if !topping_exists(&mut *tx, topping_id).await? {
        return Err(DbError::MissingReference {
            resource: "Topping",
        });
    }

    let link = sqlx::query_as::<_, PizzaTopping>(
        r#"
        INSERT INTO pizza_toppings (pizza_type_id, topping_id)
        VALUES ($1, $2)
        ON CONFLICT (pizza_type_id, topping_id) DO UPDATE SET topping_id = EXCLUDED.topping_id
        RETURNING pizza_type_id, topping_id
        "#,
    )
    .bind(pizza_type_id)
    .bind(topping_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    debug!(pizza_type_id, topping_id, "topping linked");
    Ok(link)
}

/// Names of the toppings linked to a pizza type.
///
/// Returns `DbError::MissingReference` if the pizza type does not exist and
/// an empty list if it has no toppings.
pub async fn list_topping_names(pool: &PgPool, pizza_type_id: &str) -> Result<Vec<String>, DbError> {
    if !pizza_type_exists(pool, pizza_type_id).await? {
        return Err(DbError::MissingReference {
            resource: "Pizza type",
        });
    }

    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT t.name
        FROM toppings t
        INNER JOIN pizza_toppings pt ON t.topping_id = pt.topping_id
        WHERE pt.pizza_type_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(pizza_type_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Remove every link of a pizza type. Returns the number of links removed.
pub(crate) async fn unlink_pizza_type(
    conn: &mut PgConnection,
    pizza_type_id: &str,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM pizza_toppings WHERE pizza_type_id = $1")
        .bind(pizza_type_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Remove every link to a topping. Returns the number of links removed.
pub(crate) async fn unlink_topping(
    conn: &mut PgConnection,
    topping_id: &str,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM pizza_toppings WHERE topping_id = $1")
        .bind(topping_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
