//! Admin dashboard reports.
//!
//! Each report is assembled from independent aggregate queries. They run on
//! scoped threads, each taking its own pooled connection, and the report
//! fails as a whole when any of them fails.

use std::thread::{self, ScopedJoinHandle};

use chrono::NaiveDateTime;

use crate::domain::analytics::Period;
use crate::dto::analytics::{DashboardStats, DateFilter, Overview};
use crate::repository::AnalyticsReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::services::ServiceResult;

pub const RECENT_PRODUCTS_LIMIT: usize = 5;
pub const TOP_COUNTRIES_LIMIT: usize = 5;
pub const MONTHLY_BUCKETS_LIMIT: usize = 6;

fn join<T>(handle: ScopedJoinHandle<'_, RepositoryResult<T>>) -> RepositoryResult<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(RepositoryError::Unexpected("aggregate query panicked".to_string())))
}

/// Computes the dashboard summary.
pub fn compute_dashboard_stats<R>(repo: &R) -> ServiceResult<DashboardStats>
where
    R: AnalyticsReader + Sync + ?Sized,
{
    let stats = thread::scope(|s| -> RepositoryResult<DashboardStats> {
        let total_products = s.spawn(|| repo.count_products(None));
        let total_chat_users = s.spawn(|| repo.count_leads(None));
        let recent_products = s.spawn(|| repo.recent_products(RECENT_PRODUCTS_LIMIT));
        let top_countries = s.spawn(|| repo.count_leads_by_country(TOP_COUNTRIES_LIMIT));
        let category_stats = s.spawn(|| repo.count_products_by_category());
        let monthly_stats = s.spawn(|| repo.count_leads_by_month(MONTHLY_BUCKETS_LIMIT));
        let total_value = s.spawn(|| repo.total_product_value());

        // Join every handle before surfacing the first failure.
        let total_products = join(total_products);
        let total_chat_users = join(total_chat_users);
        let recent_products = join(recent_products);
        let top_countries = join(top_countries);
        let category_stats = join(category_stats);
        let monthly_stats = join(monthly_stats);
        let total_value = join(total_value);

        Ok(DashboardStats {
            total_products: total_products?,
            total_chat_users: total_chat_users?,
            total_value: total_value?,
            recent_products: recent_products?.into_iter().map(Into::into).collect(),
            top_countries: top_countries?.into_iter().map(Into::into).collect(),
            category_stats: category_stats?.into_iter().map(Into::into).collect(),
            monthly_stats: monthly_stats?.into_iter().map(Into::into).collect(),
        })
    })
    .map_err(|err| {
        log::error!("Failed to compute dashboard stats: {err}");
        err
    })?;

    Ok(stats)
}

/// Counts products and leads created within the window named by `label`.
pub fn compute_overview<R>(
    repo: &R,
    label: Option<&str>,
    now: NaiveDateTime,
) -> ServiceResult<Overview>
where
    R: AnalyticsReader + Sync + ?Sized,
{
    let period = Period::from_label(label);
    let cutoff = period.cutoff(now);
    if period == Period::AllTime {
        log::debug!("Unrecognized overview period {label:?}, counting all records");
    }

    let (new_products, new_chat_users) = thread::scope(|s| {
        let products = s.spawn(|| repo.count_products(cutoff));
        let leads = s.spawn(|| repo.count_leads(cutoff));
        (join(products), join(leads))
    });

    let (new_products, new_chat_users) = new_products
        .and_then(|products| new_chat_users.map(|leads| (products, leads)))
        .map_err(|err| {
            log::error!("Failed to compute overview: {err}");
            err
        })?;

    Ok(Overview {
        period: label.unwrap_or(Period::DEFAULT_LABEL).to_string(),
        new_products,
        new_chat_users,
        date_filter: DateFilter {
            created_since: cutoff,
        },
    })
}
