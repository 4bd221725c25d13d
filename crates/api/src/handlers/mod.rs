//! Route handlers, one module per resource.

pub mod beverages;
pub mod invoice_items;
pub mod invoices;
pub mod pizzas;
pub mod toppings;

use axum::Json;
use serde::Serialize;

/// `{"message": "..."}` confirmation body.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// GET / - API banner
pub async fn welcome() -> Json<Message> {
    Message::new("Welcome to the Pizza Shop Billing API")
}
