//! Catalog response bodies.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::{Product, ProductImage};
use crate::domain::types::{Price, ProductId, ProductName};
use crate::pagination::Paginated;

/// One page of the catalog.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total: usize,
}

impl From<Paginated<Product>> for ProductPage {
    fn from(page: Paginated<Product>) -> Self {
        Self {
            products: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total: page.total,
        }
    }
}

/// Compact product summary shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProduct {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub images: Vec<ProductImage>,
    pub created_at: NaiveDateTime,
}

impl From<Product> for RecentProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            images: product.images,
            created_at: product.created_at,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
