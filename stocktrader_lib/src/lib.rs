//! Library layer for stocktrader: cached API client, validation, order
//! journal, and portfolio appraisal.
//!
//! Wraps the `stockserver_api` crate with an in-memory TTL cache for read
//! endpoints, retry on transient failures, input validation, a local SQLite
//! order journal, and client-side portfolio valuation.

pub mod cache;
pub mod client;
pub mod error;
pub mod journal;
pub mod portfolio;
pub mod validation;

pub use stockserver_api;
pub use stockserver_api::types;

pub use cache::MemoryCache;
pub use client::CachedClient;
pub use error::StockTraderError;
pub use journal::{Journal, JournalEntry, JournalError, OrderSide};
pub use portfolio::{appraise, Appraisal, PositionValue};
