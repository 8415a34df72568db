//! Response bodies returned by the JSON API.

pub mod analytics;
pub mod leads;
pub mod products;
