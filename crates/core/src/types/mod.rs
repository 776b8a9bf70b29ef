//! Core types for Fashion Cube.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod session;

pub use cart::{Cart, CartLine, InventoryCheck, OutOfStock, QuantityChange};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{Department, Product, department_for_category};
pub use session::{UserToken, lifetime_tag};
