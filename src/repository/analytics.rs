use chrono::NaiveDateTime;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;

use crate::domain::analytics::{KeyCount, MonthBucket};
use crate::domain::product::Product;
use crate::models::analytics::{GroupCount, MonthCount};
use crate::models::product::Product as DbProduct;
use crate::repository::errors::RepositoryResult;
use crate::repository::product::hydrate;
use crate::repository::{AnalyticsReader, DieselRepository};
use crate::schema::{leads, products};

impl AnalyticsReader for DieselRepository {
    fn count_products(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let mut query = products::table.into_boxed::<Sqlite>();
        if let Some(since) = created_since {
            query = query.filter(products::created_at.ge(since));
        }
        Ok(query.count().get_result::<i64>(&mut conn)? as usize)
    }

    fn count_leads(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let mut query = leads::table.into_boxed::<Sqlite>();
        if let Some(since) = created_since {
            query = query.filter(leads::created_at.ge(since));
        }
        Ok(query.count().get_result::<i64>(&mut conn)? as usize)
    }

    fn recent_products(&self, limit: usize) -> RepositoryResult<Vec<Product>> {
        let mut conn = self.conn()?;
        let rows = products::table
            .order((products::created_at.desc(), products::id.desc()))
            .limit(limit as i64)
            .select(DbProduct::as_select())
            .load(&mut conn)?;
        hydrate(&mut conn, rows)
    }

    fn count_products_by_category(&self) -> RepositoryResult<Vec<KeyCount>> {
        let mut conn = self.conn()?;
        let rows = sql_query(
            "SELECT category AS key, COUNT(*) AS count \
             FROM products GROUP BY category ORDER BY count DESC",
        )
        .load::<GroupCount>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_leads_by_country(&self, limit: usize) -> RepositoryResult<Vec<KeyCount>> {
        let mut conn = self.conn()?;
        let rows = sql_query(
            "SELECT country AS key, COUNT(*) AS count \
             FROM leads GROUP BY country ORDER BY count DESC LIMIT ?",
        )
        .bind::<BigInt, _>(limit as i64)
        .load::<GroupCount>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_leads_by_month(&self, limit: usize) -> RepositoryResult<Vec<MonthBucket>> {
        let mut conn = self.conn()?;
        let rows = sql_query(
            "SELECT CAST(strftime('%Y', created_at) AS INTEGER) AS year, \
                    CAST(strftime('%m', created_at) AS INTEGER) AS month, \
                    COUNT(*) AS count \
             FROM leads GROUP BY year, month ORDER BY year DESC, month DESC LIMIT ?",
        )
        .bind::<BigInt, _>(limit as i64)
        .load::<MonthCount>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn total_product_value(&self) -> RepositoryResult<f64> {
        let mut conn = self.conn()?;
        let total = products::table
            .select(sum(products::price))
            .get_result::<Option<f64>>(&mut conn)?;
        Ok(total.unwrap_or(0.0))
    }
}
