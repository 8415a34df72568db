//! Dashboard report bodies.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::domain::analytics::{KeyCount, MonthBucket};
use crate::dto::products::RecentProduct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

impl From<KeyCount> for CountryCount {
    fn from(group: KeyCount) -> Self {
        Self {
            country: group.key,
            count: group.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl From<KeyCount> for CategoryCount {
    fn from(group: KeyCount) -> Self {
        Self {
            category: group.key,
            count: group.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`.
    pub period: String,
    pub count: usize,
}

impl From<MonthBucket> for MonthlyCount {
    fn from(bucket: MonthBucket) -> Self {
        Self {
            period: bucket.period_label(),
            count: bucket.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_chat_users: usize,
    pub total_value: f64,
    pub recent_products: Vec<RecentProduct>,
    pub top_countries: Vec<CountryCount>,
    pub category_stats: Vec<CategoryCount>,
    pub monthly_stats: Vec<MonthlyCount>,
}

/// Creation time bound applied to an overview; serialized as
/// `{"createdAt":{"gte":..}}`, or `{}` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilter {
    pub created_since: Option<NaiveDateTime>,
}

#[derive(Serialize)]
struct Gte {
    gte: NaiveDateTime,
}

impl Serialize for DateFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(usize::from(self.created_since.is_some())))?;
        if let Some(gte) = self.created_since {
            map.serialize_entry("createdAt", &Gte { gte })?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Requested label, echoed verbatim.
    pub period: String,
    pub new_products: usize,
    pub new_chat_users: usize,
    pub date_filter: DateFilter,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn date_filter_serializes_bound() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 31)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap();
        let bounded = DateFilter {
            created_since: Some(ts),
        };

        assert_eq!(
            serde_json::to_value(bounded).unwrap(),
            json!({"createdAt": {"gte": "2025-01-31T08:30:00"}})
        );
        assert_eq!(serde_json::to_value(DateFilter::default()).unwrap(), json!({}));
    }

    #[test]
    fn month_bucket_becomes_period_label() {
        let monthly = MonthlyCount::from(MonthBucket {
            year: 2024,
            month: 11,
            count: 4,
        });
        assert_eq!(monthly.period, "2024-11");
        assert_eq!(monthly.count, 4);
    }
}
