//! Diesel models for catalog products and their attribute lists.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductImage as DomainProductImage,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`] without its lists.
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub price: f64,
    pub description: &'a str,
    pub category: &'a str,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
/// Data used when replacing the editable fields of a [`Product`].
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub price: f64,
    pub description: &'a str,
    pub category: &'a str,
    pub featured: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::product_colors)]
pub struct ProductColor {
    pub product_id: i32,
    pub color: String,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::product_sizes)]
pub struct ProductSize {
    pub product_id: i32,
    pub size: String,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct ProductTag {
    pub product_id: i32,
    pub tag: String,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub product_id: i32,
    pub position: i32,
    pub url: String,
    pub alt_text: String,
}

/// Attribute rows belonging to one product, each list in stored order.
#[derive(Debug, Default)]
pub struct ProductLists {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub images: Vec<DomainProductImage>,
}

impl Product {
    pub fn into_domain(self, lists: ProductLists) -> Result<DomainProduct, TypeConstraintError> {
        let mut product = DomainProduct::try_new(
            self.id,
            self.name,
            self.price,
            self.description,
            &self.category,
            self.in_stock,
            self.featured,
            self.created_at,
            self.updated_at,
        )?;
        product.colors = lists.colors;
        product.sizes = lists.sizes;
        product.tags = lists.tags;
        product.images = lists.images;
        Ok(product)
    }
}

impl<'a> NewProduct<'a> {
    pub fn from_domain(product: &'a DomainNewProduct, now: NaiveDateTime) -> Self {
        let attributes = &product.attributes;
        Self {
            name: attributes.name.as_str(),
            price: attributes.price.get(),
            description: attributes.description.as_str(),
            category: attributes.category.as_str(),
            in_stock: product.in_stock,
            featured: product.featured,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn from_domain(product: &'a DomainUpdateProduct, now: NaiveDateTime) -> Self {
        let attributes = &product.attributes;
        Self {
            name: attributes.name.as_str(),
            price: attributes.price.get(),
            description: attributes.description.as_str(),
            category: attributes.category.as_str(),
            featured: product.featured,
            updated_at: now,
        }
    }
}

fn positioned<T>(values: &[String], build: impl Fn(String, i32) -> T) -> Vec<T> {
    values
        .iter()
        .zip(0..)
        .map(|(value, position)| build(value.clone(), position))
        .collect()
}

pub fn color_rows(product_id: i32, colors: &[String]) -> Vec<ProductColor> {
    positioned(colors, |color, position| ProductColor {
        product_id,
        color,
        position,
    })
}

pub fn size_rows(product_id: i32, sizes: &[String]) -> Vec<ProductSize> {
    positioned(sizes, |size, position| ProductSize {
        product_id,
        size,
        position,
    })
}

pub fn tag_rows(product_id: i32, tags: &[String]) -> Vec<ProductTag> {
    positioned(tags, |tag, position| ProductTag {
        product_id,
        tag,
        position,
    })
}

pub fn image_rows(product_id: i32, images: &[DomainProductImage]) -> Vec<ProductImage> {
    images
        .iter()
        .zip(0..)
        .map(|(image, position)| ProductImage {
            product_id,
            position,
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
        })
        .collect()
}
