//! Storefront Domain Concerns

pub mod catalog;
pub mod customers;
pub mod promotions;
