//! Core types and trait definitions for the Vantage record stores.
//!
//! No HTTP or database dependencies. Storage backends and the HTTP boundary
//! both build on it.

// Implementations use `async fn` against the `impl Future + Send` signatures.
#![allow(async_fn_in_trait)]

pub mod competitor;
pub mod error;
pub mod id;
pub mod location;
pub mod page;
pub mod research;
pub mod social;
pub mod store;

pub use error::{Error, Result};
