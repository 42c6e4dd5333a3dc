//! SQLite backend for the Vantage record stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every call runs to completion on that
//! thread before the next starts, which serializes id assignment.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DB_FILE, SqliteStore};
