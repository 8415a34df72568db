//! Translation of raw request parameters into predicates and page requests.
//!
//! Every value arrives as an untrusted, optional string. Nothing here fails:
//! a number that cannot be parsed leaves its bound open or falls back to the
//! default, while an enumerated value naming no variant matches nothing.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::filter::{LeadFilter, PriceRange, ProductFilter, SearchTerms, Selection};
use crate::domain::types::{Category, LeadStatus};
use crate::pagination::PageRequest;

/// Sentinel accepted by category, color and status parameters meaning "no filter".
pub const ALL: &str = "all";

/// Flat request parameters, as decoded from a query string.
pub type RawParams = HashMap<String, String>;

fn param<'a>(params: &'a RawParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Like [`param`] but also discards the [`ALL`] sentinel.
fn selection<'a>(params: &'a RawParams, key: &str) -> Option<&'a str> {
    param(params, key).filter(|value| *value != ALL)
}

/// Exact match on an enumerated value; a value naming no variant matches nothing.
fn enum_selection<T: FromStr>(value: Option<&str>) -> Option<Selection<T>> {
    value.map(|v| v.parse().map_or(Selection::Unmatched, Selection::Exactly))
}

/// Parses a finite number, treating anything else as absent.
fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a positive integer, treating anything else as absent.
fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// Builds the catalog predicate from `search`, `category`, `minPrice`,
/// `maxPrice`, `color` and `featured`.
pub fn build_catalog_filter(params: &RawParams) -> ProductFilter {
    ProductFilter {
        search: param(params, "search").and_then(SearchTerms::parse),
        category: enum_selection::<Category>(selection(params, "category")),
        price: PriceRange {
            min: parse_number(param(params, "minPrice")),
            max: parse_number(param(params, "maxPrice")),
        },
        color: selection(params, "color").map(str::to_string),
        // Only the literal "true" enables the flag; "false" is not a filter.
        featured_only: params.get("featured").is_some_and(|value| value == "true"),
    }
}

/// Builds the lead predicate from `status`.
pub fn build_lead_filter(params: &RawParams) -> LeadFilter {
    LeadFilter {
        status: enum_selection::<LeadStatus>(selection(params, "status")),
    }
}

/// Reads `page` (default 1) and `limit` (default `default_limit`).
pub fn build_pagination(params: &RawParams, default_limit: usize) -> PageRequest {
    let page = parse_positive(param(params, "page")).unwrap_or(1);
    let limit = parse_positive(param(params, "limit")).unwrap_or(default_limit);
    PageRequest::new(page, limit)
}
