//! Catalog use cases: browsing, featured listing and admin maintenance.

use crate::domain::filter::ProductFilter;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::forms::products::{ProductForm, ProductPayload};
use crate::pagination::{DEFAULT_PRODUCTS_PER_PAGE, PageRequest, Paginated};
use crate::query_builder::{RawParams, build_catalog_filter, build_pagination};
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Number of products shown on the storefront landing page.
pub const FEATURED_PRODUCTS_LIMIT: usize = 8;

/// Lists the catalog page described by the raw query parameters.
pub fn list_products<R>(repo: &R, params: &RawParams) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let filter = build_catalog_filter(params);
    let page = build_pagination(params, DEFAULT_PRODUCTS_PER_PAGE);
    log::debug!("Listing products page {} with filter {filter:?}", page.page);

    let (total, products) = repo
        .list_products(ProductListQuery::new(filter).paginate(page))
        .map_err(|err| {
            log::error!("Failed to list products: {err}");
            err
        })?;

    Ok(Paginated::new(products, total, page))
}

/// Newest featured products, at most [`FEATURED_PRODUCTS_LIMIT`].
pub fn list_featured_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new(ProductFilter::featured())
        .paginate(PageRequest::new(1, FEATURED_PRODUCTS_LIMIT));
    let (_, products) = repo.list_products(query).map_err(|err| {
        log::error!("Failed to list featured products: {err}");
        err
    })?;
    Ok(products)
}

/// Ids that can never exist are reported as missing.
fn product_id(id: i32) -> ServiceResult<ProductId> {
    ProductId::new(id).map_err(|_| ServiceError::NotFound)
}

pub fn get_product<R>(repo: &R, id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let id = product_id(id)?;
    repo.get_product_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load product {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates the form and stores a new, unfeatured product.
pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = ProductPayload::try_from(form).map_err(|err| {
        log::warn!("Rejected product form: {err}");
        ServiceError::from(err)
    })?;

    let product = repo
        .create_product(&payload.into_new_product())
        .map_err(|err| {
            log::error!("Failed to create product: {err}");
            err
        })?;
    log::info!("Created product {} ({})", product.id, product.name);
    Ok(product)
}

/// Replaces the editable fields of a product. Images are kept unless new ones
/// are supplied.
pub fn update_product<R>(repo: &R, id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let id = product_id(id)?;
    let payload = ProductPayload::try_from(form).map_err(|err| {
        log::warn!("Rejected product form for {id}: {err}");
        ServiceError::from(err)
    })?;

    repo.update_product(id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update product {id}: {err}");
            ServiceError::from(err)
        })
}

pub fn delete_product<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let id = product_id(id)?;
    repo.delete_product(id).map_err(|err| {
        log::error!("Failed to delete product {id}: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Deleted product {id}");
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::filter::Selection;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn build_product(id: i32, featured: bool) -> Product {
        Product::try_new(
            id,
            format!("Product {id}"),
            10.0,
            String::new(),
            "hat",
            true,
            featured,
            NaiveDateTime::default(),
            NaiveDateTime::default(),
        )
        .expect("valid product")
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "Wool hat".to_string(),
            price: 25.0,
            description: None,
            category: Some("hat".to_string()),
            colors: Some("red,blue".to_string()),
            sizes: None,
            tags: None,
            featured: Some("true".to_string()),
            images: None,
        }
    }

    /// The page envelope is derived from the repository total.
    #[test]
    fn list_products_builds_page_envelope() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query.filter.category
                    == Some(Selection::Exactly(crate::domain::types::Category::Hat))
                    && query.pagination == Some(PageRequest::new(2, 5))
            })
            .times(1)
            .returning(|_| Ok((13, vec![build_product(6, false)])));

        let page = list_products(
            &repo,
            &params(&[("category", "hat"), ("page", "2"), ("limit", "5")]),
        )
        .unwrap();

        assert_eq!(page.total, 13);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn featured_listing_is_capped() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query.filter.featured_only
                    && query.pagination == Some(PageRequest::new(1, FEATURED_PRODUCTS_LIMIT))
            })
            .times(1)
            .returning(|_| Ok((1, vec![build_product(1, true)])));

        let products = list_featured_products(&repo).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn get_product_maps_missing_and_invalid_ids() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().times(1).returning(|_| Ok(None));

        assert!(matches!(get_product(&repo, 5), Err(ServiceError::NotFound)));
        assert!(matches!(get_product(&repo, 0), Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_product_ignores_featured_flag() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .withf(|new_product| !new_product.featured && new_product.attributes.colors.len() == 2)
            .times(1)
            .returning(|_| Ok(build_product(1, false)));

        assert!(create_product(&repo, form()).is_ok());
    }

    #[test]
    fn create_product_rejects_invalid_form() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);

        let mut invalid = form();
        invalid.name = String::new();

        assert!(matches!(
            create_product(&repo, invalid),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn update_product_passes_featured_and_keeps_images() {
        let mut repo = MockRepository::new();
        repo.expect_update_product()
            .withf(|id, updates| id.get() == 3 && updates.featured && updates.images.is_none())
            .times(1)
            .returning(|_, _| Ok(build_product(3, true)));

        let product = update_product(&repo, 3, form()).unwrap();
        assert!(product.featured);
    }

    #[test]
    fn delete_missing_product_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_product()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(delete_product(&repo, 9), Err(ServiceError::NotFound)));
    }
}
