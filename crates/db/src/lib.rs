//! `db` crate — persistence layer for the pizza shop billing schema.
//!
//! Provides the connection pool, typed row and payload structs, and
//! repository functions for every table. Each repository function takes
//! the shared pool explicitly; multi-statement operations run inside a
//! single transaction and roll back on any failure.

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use pool::DbPool;
