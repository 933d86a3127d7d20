//! SQLite backend for the whereabouts itinerary store.
//!
//! Synchronous on purpose: the core engine runs single-threaded and expects
//! its persistence collaborator to fail fast, so the store wraps a plain
//! [`rusqlite::Connection`] with no async machinery.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
