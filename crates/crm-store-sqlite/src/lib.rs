//! SQLite backend for the CRM store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod context;
mod encode;
mod schema;

pub mod error;

pub use context::SqliteContext;
pub use error::{Error, Result};
