//! Catalog product aggregate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Category, Price, ProductDescription, ProductId, ProductName, TypeConstraintError,
};

/// Image attached to a product, kept in display order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub description: ProductDescription,
    pub category: Category,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub images: Vec<ProductImage>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable attributes shared by product creation and replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductAttributes {
    pub name: ProductName,
    pub price: Price,
    pub description: ProductDescription,
    pub category: Category,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub attributes: ProductAttributes,
    pub images: Vec<ProductImage>,
    pub in_stock: bool,
    pub featured: bool,
}

impl NewProduct {
    /// New products are in stock and not featured until an admin says otherwise.
    #[must_use]
    pub fn new(attributes: ProductAttributes, images: Vec<ProductImage>) -> Self {
        Self {
            attributes,
            images,
            in_stock: true,
            featured: false,
        }
    }
}

/// Full replacement of a product's editable fields.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProduct {
    pub attributes: ProductAttributes,
    pub featured: bool,
    /// Replaces the stored images only when present.
    pub images: Option<Vec<ProductImage>>,
}

/// Splits a comma separated list, trimming entries and dropping blanks and duplicates.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: i32,
        name: String,
        price: f64,
        description: String,
        category: &str,
        in_stock: bool,
        featured: bool,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: ProductId::new(id)?,
            name: ProductName::new(name)?,
            price: Price::new(price)?,
            description: ProductDescription::new(description)?,
            category: category.parse()?,
            colors: Vec::new(),
            sizes: Vec::new(),
            tags: Vec::new(),
            images: Vec::new(),
            in_stock,
            featured,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_dedups() {
        assert_eq!(
            split_list(" red, blue ,,red,  green "),
            vec!["red".to_string(), "blue".to_string(), "green".to_string()]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }
}
