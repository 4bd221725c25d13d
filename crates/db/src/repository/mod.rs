//! Repository functions — one function per database operation.
//!
//! Every public function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Operations that touch more than one statement (merge-updates, cascading
//! deletes, link validation, invoice recomputation) open a transaction and
//! commit only when every statement succeeded.

pub mod beverages;
pub mod invoice_items;
pub mod invoices;
pub mod pizza_toppings;
pub mod pizza_types;
pub mod toppings;
