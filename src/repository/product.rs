use std::collections::HashMap;

use chrono::Utc;
use diesel::expression::IntoSql;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::domain::filter::{ProductFilter, SearchTerms, Selection};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductColor, ProductImage, ProductLists,
    ProductSize, ProductTag, UpdateProduct as DbUpdateProduct, color_rows, image_rows, size_rows,
    tag_rows,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};
use crate::schema::{product_colors, product_images, product_sizes, product_tags, products};

type ProductPredicate<'a> = Box<dyn BoxableExpression<products::table, Sqlite, SqlType = Bool> + 'a>;
type BoxedProducts<'a> = products::BoxedQuery<'a, Sqlite>;

/// Escapes LIKE wildcards so user input only matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Any term found in name, description or one of the tags.
fn search_predicate<'a>(search: &SearchTerms) -> Option<ProductPredicate<'a>> {
    search
        .terms()
        .iter()
        .map(|term| {
            let pattern = like_pattern(term);
            let tagged = product_tags::table
                .filter(product_tags::tag.like(pattern.clone()).escape('\\'))
                .select(product_tags::product_id);
            Box::new(
                products::name
                    .like(pattern.clone())
                    .escape('\\')
                    .or(products::description.like(pattern).escape('\\'))
                    .or(products::id.eq_any(tagged)),
            ) as ProductPredicate<'a>
        })
        .reduce(|acc, next| Box::new(acc.or(next)))
}

/// Applies every constrained dimension of `filter`, joined by AND.
pub(crate) fn filtered_products(filter: &ProductFilter) -> BoxedProducts<'_> {
    let mut items = products::table.into_boxed::<Sqlite>();

    if let Some(predicate) = filter.search.as_ref().and_then(search_predicate) {
        items = items.filter(predicate);
    }
    match filter.category {
        Some(Selection::Exactly(category)) => {
            items = items.filter(products::category.eq(category.as_str()));
        }
        Some(Selection::Unmatched) => items = items.filter(false.into_sql::<Bool>()),
        None => {}
    }
    if let Some(min) = filter.price.min {
        items = items.filter(products::price.ge(min));
    }
    if let Some(max) = filter.price.max {
        items = items.filter(products::price.le(max));
    }
    if let Some(color) = &filter.color {
        let colored = product_colors::table
            .filter(product_colors::color.eq(color))
            .select(product_colors::product_id);
        items = items.filter(products::id.eq_any(colored));
    }
    if filter.featured_only {
        items = items.filter(products::featured.eq(true));
    }

    items
}

/// Loads the attribute lists for `rows` and assembles domain products in row order.
pub(crate) fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let mut lists: HashMap<i32, ProductLists> = HashMap::new();

    for color in product_colors::table
        .filter(product_colors::product_id.eq_any(&ids))
        .order((product_colors::product_id, product_colors::position))
        .select(ProductColor::as_select())
        .load(conn)?
    {
        lists.entry(color.product_id).or_default().colors.push(color.color);
    }

    for size in product_sizes::table
        .filter(product_sizes::product_id.eq_any(&ids))
        .order((product_sizes::product_id, product_sizes::position))
        .select(ProductSize::as_select())
        .load(conn)?
    {
        lists.entry(size.product_id).or_default().sizes.push(size.size);
    }

    for tag in product_tags::table
        .filter(product_tags::product_id.eq_any(&ids))
        .order((product_tags::product_id, product_tags::position))
        .select(ProductTag::as_select())
        .load(conn)?
    {
        lists.entry(tag.product_id).or_default().tags.push(tag.tag);
    }

    for image in product_images::table
        .filter(product_images::product_id.eq_any(&ids))
        .order((product_images::product_id, product_images::position))
        .select(ProductImage::as_select())
        .load(conn)?
    {
        lists
            .entry(image.product_id)
            .or_default()
            .images
            .push(crate::domain::product::ProductImage {
                url: image.url,
                alt_text: image.alt_text,
            });
    }

    rows.into_iter()
        .map(|row| {
            let product_lists = lists.remove(&row.id).unwrap_or_default();
            row.into_domain(product_lists).map_err(RepositoryError::from)
        })
        .collect()
}

fn replace_lists(
    conn: &mut SqliteConnection,
    product_id: i32,
    colors: &[String],
    sizes: &[String],
    tags: &[String],
) -> RepositoryResult<()> {
    diesel::delete(product_colors::table.filter(product_colors::product_id.eq(product_id)))
        .execute(conn)?;
    diesel::delete(product_sizes::table.filter(product_sizes::product_id.eq(product_id)))
        .execute(conn)?;
    diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
        .execute(conn)?;

    if !colors.is_empty() {
        diesel::insert_into(product_colors::table)
            .values(&color_rows(product_id, colors))
            .execute(conn)?;
    }
    if !sizes.is_empty() {
        diesel::insert_into(product_sizes::table)
            .values(&size_rows(product_id, sizes))
            .execute(conn)?;
    }
    if !tags.is_empty() {
        diesel::insert_into(product_tags::table)
            .values(&tag_rows(product_id, tags))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_images(
    conn: &mut SqliteConnection,
    product_id: i32,
    images: &[crate::domain::product::ProductImage],
) -> RepositoryResult<()> {
    diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
        .execute(conn)?;
    if !images.is_empty() {
        diesel::insert_into(product_images::table)
            .values(&image_rows(product_id, images))
            .execute(conn)?;
    }
    Ok(())
}

fn single(conn: &mut SqliteConnection, row: DbProduct) -> RepositoryResult<Product> {
    hydrate(conn, vec![row])?
        .pop()
        .ok_or_else(|| RepositoryError::Unexpected("product vanished while loading".to_string()))
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        let row = products::table
            .find(id.get())
            .select(DbProduct::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| single(&mut conn, row)).transpose()
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let mut conn = self.conn()?;

        // Get the total count before applying pagination
        let total = filtered_products(&query.filter)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query.filter)
            .order((products::created_at.desc(), products::id.desc()));
        if let Some(page) = &query.pagination {
            let Some((offset, limit)) = page.sql_bounds() else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbProduct>(&mut conn)?;
        Ok((total, hydrate(&mut conn, rows)?))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(products::table)
                .values(&DbNewProduct::from_domain(new_product, now))
                .returning(DbProduct::as_returning())
                .get_result(conn)?;

            let attributes = &new_product.attributes;
            replace_lists(
                conn,
                row.id,
                &attributes.colors,
                &attributes.sizes,
                &attributes.tags,
            )?;
            replace_images(conn, row.id, &new_product.images)?;
            Ok(row)
        })?;

        single(&mut conn, row)
    }

    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::update(products::table.find(id.get()))
                .set(&DbUpdateProduct::from_domain(updates, now))
                .returning(DbProduct::as_returning())
                .get_result(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let attributes = &updates.attributes;
            replace_lists(
                conn,
                row.id,
                &attributes.colors,
                &attributes.sizes,
                &attributes.tags,
            )?;
            if let Some(images) = &updates.images {
                replace_images(conn, row.id, images)?;
            }
            Ok(row)
        })?;

        single(&mut conn, row)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let id = id.get();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            replace_lists(conn, id, &[], &[], &[])?;
            replace_images(conn, id, &[])?;
            let deleted = diesel::delete(products::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("wool"), "%wool%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
