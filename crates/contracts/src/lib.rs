//! Wire DTOs and pure domain rules shared by the storefront and the admin back-office.
//!
//! Nothing in this crate touches browser APIs, so every rule here is unit-tested natively.

pub mod domain;
pub mod shared;
pub mod system;
