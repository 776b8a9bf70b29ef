//! Fashion Cube Storefront library.
//!
//! Two halves share one storage layer:
//!
//! - the API server (`routes`, `state`, `middleware`) serving users, carts
//!   and the catalog over a [`storage::KeyValueStore`];
//! - the client bridges (`services`) that call that API through
//!   [`api::HttpApiClient`] and fall back to a locally persisted store when
//!   a call fails.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
