//! Invoice operations, including total recomputation and the printable
//! invoice view.
//!
//! Adding, changing or removing an invoice item never touches the parent
//! invoice's totals. Callers refresh them explicitly through
//! [`update_invoice`], which recomputes subtotal, tax and total from the
//! items present at that moment.

use billing::{InvoiceTotals, MergeNonEmpty};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{
    models::{advance_timestamp, Invoice, InvoiceChanges, InvoiceSummary, NewInvoice, PrintableInvoice},
    repository::invoice_items,
    DbError,
};

/// Return every invoice.
pub async fn list_invoices(pool: &PgPool) -> Result<Vec<Invoice>, DbError> {
    let rows = sqlx::query_as::<_, Invoice>(
        r#"
        SELECT invoice_id, invoice_date, subtotal, tax, total, customer_name, updated_at
        FROM invoices
        ORDER BY invoice_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Open a new invoice dated today with all totals at zero.
pub async fn create_invoice(pool: &PgPool, new: NewInvoice) -> Result<Invoice, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (invoice_date, subtotal, tax, total, customer_name, updated_at)
        VALUES ($1, $2, $2, $2, $3, $4)
        RETURNING invoice_id, invoice_date, subtotal, tax, total, customer_name, updated_at
        "#,
    )
    .bind(now.date_naive())
    .bind(Decimal::ZERO)
    .bind(new.customer_name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(invoice_id = row.invoice_id, "invoice created");
    Ok(row)
}

/// Apply a customer name change and recompute the invoice totals from its
/// current items.
///
/// Returns `DbError::NotFound` if no invoice has this id.
#[instrument(skip(pool, changes))]
pub async fn update_invoice(
    pool: &PgPool,
    invoice_id: i64,
    changes: InvoiceChanges,
) -> Result<Invoice, DbError> {
    let mut tx = pool.begin().await?;

    let mut invoice = sqlx::query_as::<_, Invoice>(
        r#"
        SELECT invoice_id, invoice_date, subtotal, tax, total, customer_name, updated_at
        FROM invoices
        WHERE invoice_id = $1
        FOR UPDATE
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("invoice", invoice_id))?;

    invoice.merge_non_empty(changes);
    invoice.updated_at = advance_timestamp(invoice.updated_at);

    let lines = invoice_items::invoice_lines(&mut *tx, invoice_id).await?;
    let line_count = lines.len();
    let totals = InvoiceTotals::from_lines(lines);

    let row = sqlx::query_as::<_, Invoice>(
        r#"
        UPDATE invoices
        SET customer_name = $1, updated_at = $2, subtotal = $3, tax = $4, total = $5
        WHERE invoice_id = $6
        RETURNING invoice_id, invoice_date, subtotal, tax, total, customer_name, updated_at
        "#,
    )
    .bind(&invoice.customer_name)
    .bind(invoice.updated_at)
    .bind(totals.subtotal)
    .bind(totals.tax)
    .bind(totals.total)
    .bind(invoice_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    debug!(line_count, total = %row.total, "invoice totals recomputed");
    Ok(row)
}

/// Delete an invoice together with its items.
pub async fn delete_invoice(pool: &PgPool, invoice_id: i64) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let items = invoice_items::delete_items_of_invoice(&mut *tx, invoice_id).await?;
    let result = sqlx::query("DELETE FROM invoices WHERE invoice_id = $1")
        .bind(invoice_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(
        invoice_id,
        items,
        deleted = result.rows_affected(),
        "invoice deleted"
    );
    Ok(())
}

/// Assemble the printable view of an invoice: its totals header and every
/// item. Customer name and date are deliberately left out.
pub async fn printable_invoice(pool: &PgPool, invoice_id: i64) -> Result<PrintableInvoice, DbError> {
    let invoice = sqlx::query_as::<_, InvoiceSummary>(
        "SELECT invoice_id, subtotal, tax, total FROM invoices WHERE invoice_id = $1",
    )
    .bind(invoice_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DbError::not_found("invoice", invoice_id))?;

    let invoice_items = invoice_items::list_invoice_items(pool, invoice_id).await?;

    Ok(PrintableInvoice {
        invoice,
        invoice_items,
    })
}
