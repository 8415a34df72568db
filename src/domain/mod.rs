//! Domain aggregates exposed by the storefront service layer.

pub mod analytics;
pub mod filter;
pub mod lead;
pub mod product;
pub mod types;
