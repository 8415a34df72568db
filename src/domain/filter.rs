//! Predicates selecting products and leads.
//!
//! A predicate is a plain value: the repository translates it into a storage
//! query, and [`ProductFilter::matches`] / [`LeadFilter::matches`] define which
//! records that query is expected to admit. A default predicate admits
//! everything.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::product::Product;
use crate::domain::types::{Category, LeadStatus};

/// Whitespace separated search terms. A record matches when any term occurs
/// in any searchable field, ignoring ASCII case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    /// Returns `None` when the input holds no terms.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut terms: Vec<String> = Vec::new();
        for term in raw.split_whitespace() {
            if !terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
                terms.push(term.to_string());
            }
        }
        (!terms.is_empty()).then_some(Self(terms))
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<String> = fields.into_iter().map(str::to_ascii_lowercase).collect();
        self.0.iter().any(|term| {
            let term = term.to_ascii_lowercase();
            fields.iter().any(|field| field.contains(&term))
        })
    }
}

/// Closed numeric range on price. Missing bounds are open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Exact match on an enumerated field.
///
/// A requested value that names no variant still constrains the field, so it
/// is kept as [`Selection::Unmatched`] and admits no record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Selection<T> {
    Exactly(T),
    Unmatched,
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::Exactly(expected) => expected == value,
            Selection::Unmatched => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductFilter {
    pub search: Option<SearchTerms>,
    pub category: Option<Selection<Category>>,
    pub price: PriceRange,
    /// Product color list must contain this value exactly.
    pub color: Option<String>,
    pub featured_only: bool,
}

impl ProductFilter {
    /// Predicate selecting featured products only.
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Self::default()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search {
            let fields = [product.name.as_str(), product.description.as_str()]
                .into_iter()
                .chain(product.tags.iter().map(String::as_str));
            if !search.matches_any(fields) {
                return false;
            }
        }
        if self
            .category
            .is_some_and(|category| !category.admits(&product.category))
        {
            return false;
        }
        if !self.price.contains(product.price.get()) {
            return false;
        }
        if let Some(color) = &self.color
            && !product.colors.iter().any(|c| c == color)
        {
            return false;
        }
        !self.featured_only || product.featured
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeadFilter {
    pub status: Option<Selection<LeadStatus>>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|status| status.admits(&lead.status))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn product(name: &str, price: f64, category: &str, colors: &[&str], featured: bool) -> Product {
        let mut product = Product::try_new(
            1,
            name.to_string(),
            price,
            "Hand knitted".to_string(),
            category,
            true,
            featured,
            NaiveDateTime::default(),
            NaiveDateTime::default(),
        )
        .expect("valid product");
        product.colors = colors.iter().map(|c| c.to_string()).collect();
        product.tags = vec!["winter".to_string()];
        product
    }

    #[test]
    fn default_filter_admits_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&product("Wool hat", 10.0, "hat", &[], false)));
    }

    #[test]
    fn search_matches_any_term_in_any_field() {
        let item = product("Wool hat", 10.0, "hat", &[], false);
        let by_tag = ProductFilter {
            search: SearchTerms::parse("WINTER"),
            ..ProductFilter::default()
        };
        let by_description = ProductFilter {
            search: SearchTerms::parse("summer knitted"),
            ..ProductFilter::default()
        };
        let no_match = ProductFilter {
            search: SearchTerms::parse("silk"),
            ..ProductFilter::default()
        };

        assert!(by_tag.matches(&item));
        assert!(by_description.matches(&item));
        assert!(!no_match.matches(&item));
    }

    #[test]
    fn search_terms_ignore_blank_input() {
        assert_eq!(SearchTerms::parse("   "), None);
        assert_eq!(
            SearchTerms::parse(" red  Red scarf ").unwrap().terms(),
            &["red".to_string(), "scarf".to_string()]
        );
    }

    #[test]
    fn inverted_price_range_admits_nothing() {
        let range = PriceRange {
            min: Some(50.0),
            max: Some(10.0),
        };
        assert!(!range.contains(5.0));
        assert!(!range.contains(30.0));
        assert!(!range.contains(60.0));
    }

    #[test]
    fn color_must_be_contained_exactly() {
        let item = product("Scarf", 10.0, "scarf", &["red", "blue"], false);
        let red = ProductFilter {
            color: Some("red".to_string()),
            ..ProductFilter::default()
        };
        let reddish = ProductFilter {
            color: Some("re".to_string()),
            ..ProductFilter::default()
        };
        assert!(red.matches(&item));
        assert!(!reddish.matches(&item));
    }

    #[test]
    fn lead_filter_by_status() {
        let lead = Lead::try_new(
            1,
            "Jane".to_string(),
            "555".to_string(),
            "Canada".to_string(),
            None,
            NaiveDateTime::default(),
            "inactive",
            NaiveDateTime::default(),
            NaiveDateTime::default(),
        )
        .expect("valid lead");

        assert!(LeadFilter::default().matches(&lead));
        assert!(
            LeadFilter {
                status: Some(Selection::Exactly(LeadStatus::Inactive))
            }
            .matches(&lead)
        );
        assert!(
            !LeadFilter {
                status: Some(Selection::Exactly(LeadStatus::Active))
            }
            .matches(&lead)
        );
        assert!(
            !LeadFilter {
                status: Some(Selection::Unmatched)
            }
            .matches(&lead)
        );
    }

    #[test]
    fn unmatched_selection_admits_nothing() {
        let boots = ProductFilter {
            category: Some(Selection::Unmatched),
            ..ProductFilter::default()
        };
        let hat = ProductFilter {
            category: Some(Selection::Exactly(Category::Hat)),
            ..ProductFilter::default()
        };
        let item = product("Wool hat", 10.0, "hat", &[], false);

        assert!(!boots.matches(&item));
        assert!(!boots.is_unconstrained());
        assert!(hat.matches(&item));
    }

    #[test]
    fn featured_filter_requires_flag() {
        assert!(!ProductFilter::featured().matches(&product("Scarf", 1.0, "scarf", &[], false)));
        assert!(ProductFilter::featured().matches(&product("Scarf", 1.0, "scarf", &[], true)));
    }
}
