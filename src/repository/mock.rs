//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::analytics::{KeyCount, MonthBucket};
use crate::domain::lead::{Lead, NewLead};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{LeadId, LeadStatus, PhoneNumber, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AnalyticsReader, LeadListQuery, LeadReader, LeadWriter, ProductListQuery, ProductReader,
    ProductWriter,
};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            id: ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }

    impl LeadReader for Repository {
        fn get_lead_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn touch_lead(&self, id: LeadId, contacted_at: NaiveDateTime) -> RepositoryResult<Lead>;
        fn update_lead_status(&self, id: LeadId, status: LeadStatus) -> RepositoryResult<Lead>;
    }

    impl AnalyticsReader for Repository {
        fn count_products(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize>;
        fn count_leads(&self, created_since: Option<NaiveDateTime>) -> RepositoryResult<usize>;
        fn recent_products(&self, limit: usize) -> RepositoryResult<Vec<Product>>;
        fn count_products_by_category(&self) -> RepositoryResult<Vec<KeyCount>>;
        fn count_leads_by_country(&self, limit: usize) -> RepositoryResult<Vec<KeyCount>>;
        fn count_leads_by_month(&self, limit: usize) -> RepositoryResult<Vec<MonthBucket>>;
        fn total_product_value(&self) -> RepositoryResult<f64>;
    }
}
