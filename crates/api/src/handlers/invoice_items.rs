use axum::{
    extract::{Path, State},
    Json,
};
use db::models::{InvoiceItem, InvoiceItemInput};
use db::repository::invoice_items as item_repo;
use tracing::info;

use super::Message;
use crate::{error::ApiResult, extract::Payload, AppState};

/// GET /invoices/{invoice_id}/items
pub async fn list(
    Path(invoice_id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InvoiceItem>>> {
    let items = item_repo::list_invoice_items(&state.pool, invoice_id).await?;
    Ok(Json(items))
}

/// POST /invoices/{invoice_id}/items
pub async fn create(
    Path(invoice_id): Path<i64>,
    State(state): State<AppState>,
    Payload(input): Payload<InvoiceItemInput>,
) -> ApiResult<Json<InvoiceItem>> {
    let item = item_repo::create_invoice_item(&state.pool, invoice_id, input).await?;
    info!(invoice_id, invoice_item_id = item.invoice_item_id, "Added invoice item");
    Ok(Json(item))
}

/// PUT /invoices/items/{invoice_item_id}
pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Payload(input): Payload<InvoiceItemInput>,
) -> ApiResult<Json<InvoiceItem>> {
    let item = item_repo::update_invoice_item(&state.pool, id, input).await?;
    info!(invoice_item_id = id, "Updated invoice item");
    Ok(Json(item))
}

/// DELETE /invoices/items/{invoice_item_id}
pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> ApiResult<Json<Message>> {
    item_repo::delete_invoice_item(&state.pool, id).await?;
    info!(invoice_item_id = id, "Deleted invoice item");
    Ok(Message::new("Invoice item deleted successfully"))
}
