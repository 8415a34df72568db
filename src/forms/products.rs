//! Payloads for creating and editing catalog products.

use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{
    NewProduct, ProductAttributes, ProductImage, UpdateProduct, split_list,
};
use crate::domain::types::{Category, Price, ProductDescription, ProductName};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageForm {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Product fields as submitted by the admin console.
///
/// List attributes arrive as comma separated strings, `featured` as the
/// literal `"true"` when checked.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub images: Option<Vec<ProductImageForm>>,
}

/// Validated product payload.
pub struct ProductPayload {
    pub attributes: ProductAttributes,
    pub featured: bool,
    pub images: Option<Vec<ProductImage>>,
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = ProductName::new(form.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let price = Price::new(form.price).map_err(|_| FormError::InvalidPrice)?;
        let description = ProductDescription::new(form.description.unwrap_or_default())
            .map_err(|_| FormError::InvalidDescription)?;
        let category = match form.category.as_deref().map(str::trim) {
            None | Some("") => Category::default(),
            Some(value) => value
                .parse::<Category>()
                .map_err(|_| FormError::InvalidCategory)?,
        };

        // Alt text falls back to the product name.
        let images = form.images.map(|images| {
            images
                .into_iter()
                .map(|image| ProductImage {
                    url: image.url.trim().to_string(),
                    alt_text: image
                        .alt_text
                        .map(|alt| alt.trim().to_string())
                        .filter(|alt| !alt.is_empty())
                        .unwrap_or_else(|| name.to_string()),
                })
                .collect::<Vec<_>>()
        });
        if images
            .as_ref()
            .is_some_and(|images| images.iter().any(|image| image.url.is_empty()))
        {
            return Err(FormError::InvalidImage);
        }

        Ok(Self {
            attributes: ProductAttributes {
                name,
                price,
                description,
                category,
                colors: form.colors.as_deref().map(split_list).unwrap_or_default(),
                sizes: form.sizes.as_deref().map(split_list).unwrap_or_default(),
                tags: form.tags.as_deref().map(split_list).unwrap_or_default(),
            },
            featured: form.featured.as_deref() == Some("true"),
            images,
        })
    }
}

impl ProductPayload {
    /// New products start unfeatured regardless of the submitted flag.
    pub fn into_new_product(self) -> NewProduct {
        NewProduct::new(self.attributes, self.images.unwrap_or_default())
    }

    pub fn into_update(self) -> UpdateProduct {
        UpdateProduct {
            attributes: self.attributes,
            featured: self.featured,
            images: self.images.filter(|images| !images.is_empty()),
        }
    }
}
