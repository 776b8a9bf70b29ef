//! Domain models for the storefront.
//!
//! Catalog and cart types are shared with the client and live in
//! `fashion-cube-core`; this module holds types only the storefront needs.

pub mod user;

pub use user::User;
