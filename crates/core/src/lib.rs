//! Storefront
//!
//! Promotion rules for the storefront: promotion definitions, derived status,
//! eligibility checks and discount computation. This crate performs no I/O;
//! storage and transport live in the application crates.

pub mod membership;
pub mod money;
pub mod products;
pub mod promotions;
pub mod uuids;
