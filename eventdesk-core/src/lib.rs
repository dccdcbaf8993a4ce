//! Core of eventdesk: the client-side event state manager.
//!
//! - `normalize` maps foreign payloads onto the canonical [`Event`]
//! - `gateway` talks to the remote events API (or an in-memory stand-in)
//! - `filter` evaluates date range and importance filters
//! - `store` holds the collection, filter and selection
//! - `operations` ties gateway calls to store transitions

pub mod config;
pub mod demo;
pub mod error;
pub mod event;
pub mod filter;
pub mod gateway;
pub mod normalize;
pub mod operations;
pub mod store;

// Re-export all event types at crate root for convenience
pub use event::*;
