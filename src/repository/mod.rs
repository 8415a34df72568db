//! Storage contract used by the services and its Diesel implementation.

use chrono::NaiveDateTime;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        analytics::{KeyCount, MonthBucket},
        filter::{LeadFilter, ProductFilter},
        lead::{Lead, NewLead},
        product::{NewProduct, Product, UpdateProduct},
        types::{LeadId, LeadStatus, PhoneNumber, ProductId},
    },
    pagination::PageRequest,
    repository::errors::RepositoryResult,
};

pub mod analytics;
pub mod errors;
pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod product;

/// Products matching `filter`, newest first, optionally restricted to one page.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub filter: ProductFilter,
    pub pagination: Option<PageRequest>,
}

/// Leads matching `filter`, most recently contacted first, optionally paged.
#[derive(Debug, Clone, Default)]
pub struct LeadListQuery {
    pub filter: LeadFilter,
    pub pagination: Option<PageRequest>,
}

impl ProductListQuery {
    pub fn new(filter: ProductFilter) -> Self {
        Self {
            filter,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

impl LeadListQuery {
    pub fn new(filter: LeadFilter) -> Self {
        Self {
            filter,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Returns the total number of matches together with the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

pub trait LeadReader {
    fn get_lead_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    /// Refreshes `last_contact` of an existing lead.
    fn touch_lead(&self, id: LeadId, contacted_at: NaiveDateTime) -> RepositoryResult<Lead>;
    fn update_lead_status(&self, id: LeadId, status: LeadStatus) -> RepositoryResult<Lead>;
}

/// Aggregate queries backing the admin dashboard.
pub trait AnalyticsReader {
    /// Counts products, optionally only those created at or after `created_since`.
    fn count_products(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize>;
    /// Counts leads, optionally only those created at or after `created_since`.
    fn count_leads(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize>;
    fn recent_products(&self, limit: usize) -> RepositoryResult<Vec<Product>>;
    /// Product count per category, largest first.
    fn count_products_by_category(&self) -> RepositoryResult<Vec<KeyCount>>;
    /// Lead count per country, largest first, at most `limit` entries.
    fn count_leads_by_country(&self, limit: usize) -> RepositoryResult<Vec<KeyCount>>;
    /// Lead count per creation month, latest month first, at most `limit` entries.
    fn count_leads_by_month(&self, limit: usize) -> RepositoryResult<Vec<MonthBucket>>;
    /// Sum of all product prices; zero for an empty catalog.
    fn total_product_value(&self) -> RepositoryResult<f64>;
}

/// Diesel backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
