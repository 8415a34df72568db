//! Database models shared across the storefront repository.

pub mod analytics;
#[cfg(feature = "server")]
pub mod config;
pub mod lead;
pub mod product;
