//! Fashion Cube Core - Shared domain types.
//!
//! This crate provides the types used across all Fashion Cube components:
//! - `storefront` - API server, local fallback store, and client bridges
//! - `cli` - Command-line tools for seeding and exercising the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. The cart aggregate invariant lives here so that the API
//! server and the client-side fallback share one implementation.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, prices, products, carts and session tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
