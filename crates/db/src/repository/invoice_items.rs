//! Invoice item operations, scoped under their owning invoice.

use billing::MergeNonEmpty;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::{
    models::{InvoiceItem, InvoiceItemInput},
    DbError,
};

/// Return the items of one invoice in insertion order.
pub async fn list_invoice_items(pool: &PgPool, invoice_id: i64) -> Result<Vec<InvoiceItem>, DbError> {
    let rows = sqlx::query_as::<_, InvoiceItem>(
        r#"
        SELECT invoice_item_id, invoice_id, item_id, quantity, unit_price
        FROM invoice_items
        WHERE invoice_id = $1
        ORDER BY invoice_item_id
        "#,
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Add an item to an invoice. The invoice totals are left as they are.
pub async fn create_invoice_item(
    pool: &PgPool,
    invoice_id: i64,
    input: InvoiceItemInput,
) -> Result<InvoiceItem, DbError> {
    let row = sqlx::query_as::<_, InvoiceItem>(
        r#"
        INSERT INTO invoice_items (invoice_id, item_id, quantity, unit_price)
        VALUES ($1, $2, $3, $4)
        RETURNING invoice_item_id, invoice_id, item_id, quantity, unit_price
        "#,
    )
    .bind(invoice_id)
    .bind(input.item_id)
    .bind(input.quantity)
    .bind(input.unit_price)
    .fetch_one(pool)
    .await?;

    debug!(invoice_id, invoice_item_id = row.invoice_item_id, "invoice item created");
    Ok(row)
}

/// Merge the non-blank fields of `input` into a stored item.
pub async fn update_invoice_item(
    pool: &PgPool,
    invoice_item_id: i64,
    input: InvoiceItemInput,
) -> Result<InvoiceItem, DbError> {
    let mut tx = pool.begin().await?;

    let mut item = sqlx::query_as::<_, InvoiceItem>(
        r#"
        SELECT invoice_item_id, invoice_id, item_id, quantity, unit_price
        FROM invoice_items
        WHERE invoice_item_id = $1
        FOR UPDATE
        "#,
    )
    .bind(invoice_item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("invoice item", invoice_item_id))?;

    item.merge_non_empty(input);

    let row = sqlx::query_as::<_, InvoiceItem>(
        r#"
        UPDATE invoice_items
        SET item_id = $1, quantity = $2, unit_price = $3
        WHERE invoice_item_id = $4
        RETURNING invoice_item_id, invoice_id, item_id, quantity, unit_price
        "#,
    )
    .bind(&item.item_id)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(invoice_item_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Permanently delete an invoice item. Deleting an unknown id is not an error.
pub async fn delete_invoice_item(pool: &PgPool, invoice_item_id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM invoice_items WHERE invoice_item_id = $1")
        .bind(invoice_item_id)
        .execute(pool)
        .await?;

    debug!(invoice_item_id, deleted = result.rows_affected(), "invoice item deleted");
    Ok(())
}

/// `(quantity, unit_price)` of every item of an invoice.
pub(crate) async fn invoice_lines(
    conn: &mut PgConnection,
    invoice_id: i64,
) -> Result<Vec<(i32, Decimal)>, DbError> {
    let lines = sqlx::query_as::<_, (i32, Decimal)>(
        "SELECT quantity, unit_price FROM invoice_items WHERE invoice_id = $1",
    )
    .bind(invoice_id)
    .fetch_all(conn)
    .await?;

    Ok(lines)
}

pub(crate) async fn delete_items_of_invoice(
    conn: &mut PgConnection,
    invoice_id: i64,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
        .bind(invoice_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
