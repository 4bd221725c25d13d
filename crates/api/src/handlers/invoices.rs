//! Invoice routes.
//!
//! `PUT /invoices/{invoice_id}` is the only way invoice totals change: item
//! routes leave them stale until the invoice is updated again.

use axum::{
    extract::{Path, State},
    Json,
};
use db::models::{Invoice, InvoiceChanges, NewInvoice, PrintableInvoice};
use db::repository::invoices as invoice_repo;
use tracing::info;

use super::Message;
use crate::{error::ApiResult, extract::Payload, AppState};

/// GET /invoices
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Invoice>>> {
    let invoices = invoice_repo::list_invoices(&state.pool).await?;
    Ok(Json(invoices))
}

/// POST /invoices - totals always start at zero
pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewInvoice>,
) -> ApiResult<Json<Invoice>> {
    let invoice = invoice_repo::create_invoice(&state.pool, new).await?;
    info!(invoice_id = invoice.invoice_id, "Created invoice");
    Ok(Json(invoice))
}

/// PUT /invoices/{invoice_id} - merge customer name and recompute totals
pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Payload(changes): Payload<InvoiceChanges>,
) -> ApiResult<Json<Invoice>> {
    let invoice = invoice_repo::update_invoice(&state.pool, id, changes).await?;
    info!(invoice_id = id, total = %invoice.total, "Updated invoice");
    Ok(Json(invoice))
}

/// DELETE /invoices/{invoice_id}
pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Json<Message>> {
    invoice_repo::delete_invoice(&state.pool, id).await?;
    info!(invoice_id = id, "Deleted invoice");
    Ok(Message::new("Invoice deleted successfully"))
}

/// GET /invoices/{invoice_id}/print
pub async fn print(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Json<PrintableInvoice>> {
    let printable = invoice_repo::printable_invoice(&state.pool, id).await?;
    Ok(Json(printable))
}
