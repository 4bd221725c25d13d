//! Row structs that map 1-to-1 onto database tables, plus the request
//! payloads the repositories accept.
//!
//! Payload structs default every optional field so a partial JSON body
//! decodes; blank fields are then ignored by the merge-update rules in
//! the `billing` crate.

use billing::{keep_or_replace, MergeNonEmpty};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Next `updated_at` value for a row last touched at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// moved past the stored (microsecond precision) value.
pub(crate) fn advance_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let earliest = previous + Duration::microseconds(1);
    Utc::now().max(earliest)
}

// ---------------------------------------------------------------------------
// pizza_types
// ---------------------------------------------------------------------------

/// A persisted pizza type row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PizzaType {
    pub pizza_type_id: String,
    pub name: String,
    pub size: String,
    pub base_price: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /pizzas`. The identifier is chosen by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPizzaType {
    pub pizza_type_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /pizzas/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PizzaTypeChanges {
    pub name: String,
    pub size: String,
    pub base_price: Decimal,
    pub description: String,
}

impl MergeNonEmpty<PizzaTypeChanges> for PizzaType {
    fn merge_non_empty(&mut self, changes: PizzaTypeChanges) {
        keep_or_replace(&mut self.name, changes.name);
        keep_or_replace(&mut self.size, changes.size);
        keep_or_replace(&mut self.base_price, changes.base_price);
        keep_or_replace(&mut self.description, changes.description);
    }
}

// ---------------------------------------------------------------------------
// toppings
// ---------------------------------------------------------------------------

/// A persisted topping row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Topping {
    pub topping_id: String,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTopping {
    pub topping_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToppingChanges {
    pub name: String,
    pub price: Decimal,
}

impl MergeNonEmpty<ToppingChanges> for Topping {
    fn merge_non_empty(&mut self, changes: ToppingChanges) {
        keep_or_replace(&mut self.name, changes.name);
        keep_or_replace(&mut self.price, changes.price);
    }
}

// ---------------------------------------------------------------------------
// pizza_toppings
// ---------------------------------------------------------------------------

/// A pizza type ↔ topping association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PizzaTopping {
    pub pizza_type_id: String,
    pub topping_id: String,
}

// ---------------------------------------------------------------------------
// beverages
// ---------------------------------------------------------------------------

/// A persisted beverage row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Beverage {
    pub beverage_id: String,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBeverage {
    pub beverage_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BeverageChanges {
    pub name: String,
    pub price: Decimal,
}

impl MergeNonEmpty<BeverageChanges> for Beverage {
    fn merge_non_empty(&mut self, changes: BeverageChanges) {
        keep_or_replace(&mut self.name, changes.name);
        keep_or_replace(&mut self.price, changes.price);
    }
}

// ---------------------------------------------------------------------------
// invoices
// ---------------------------------------------------------------------------

/// A persisted invoice row.
///
/// `subtotal`, `tax` and `total` are derived from the invoice's items and
/// only change when the invoice itself is updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub invoice_id: i64,
    pub invoice_date: NaiveDate,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub customer_name: String,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /invoices`. Any totals in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewInvoice {
    pub customer_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceChanges {
    pub customer_name: String,
}

impl MergeNonEmpty<InvoiceChanges> for Invoice {
    fn merge_non_empty(&mut self, changes: InvoiceChanges) {
        keep_or_replace(&mut self.customer_name, changes.customer_name);
    }
}

/// Invoice header as shown on the printable invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvoiceSummary {
    pub invoice_id: i64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Header plus every line of one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableInvoice {
    pub invoice: InvoiceSummary,
    pub invoice_items: Vec<InvoiceItem>,
}

// ---------------------------------------------------------------------------
// invoice_items
// ---------------------------------------------------------------------------

/// A persisted invoice line. `item_id` names a pizza type or topping but
/// is not checked against either table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub invoice_item_id: i64,
    pub invoice_id: i64,
    pub item_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Body of `POST /invoices/{id}/items` and `PUT /invoices/items/{item_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceItemInput {
    pub item_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl MergeNonEmpty<InvoiceItemInput> for InvoiceItem {
    fn merge_non_empty(&mut self, changes: InvoiceItemInput) {
        keep_or_replace(&mut self.item_id, changes.item_id);
        keep_or_replace(&mut self.quantity, changes.quantity);
        keep_or_replace(&mut self.unit_price, changes.unit_price);
    }
}
