//! Row shapes returned by aggregate queries.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};

#[derive(Debug, Clone, QueryableByName)]
/// Count of records sharing one grouping key.
pub struct GroupCount {
    #[diesel(sql_type = Text)]
    pub key: String,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

#[derive(Debug, Clone, QueryableByName)]
/// Count of records created within one calendar month.
pub struct MonthCount {
    #[diesel(sql_type = Integer)]
    pub year: i32,
    #[diesel(sql_type = Integer)]
    pub month: i32,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl From<GroupCount> for crate::domain::analytics::KeyCount {
    fn from(row: GroupCount) -> Self {
        Self {
            key: row.key,
            count: usize::try_from(row.count).unwrap_or_default(),
        }
    }
}

impl From<MonthCount> for crate::domain::analytics::MonthBucket {
    fn from(row: MonthCount) -> Self {
        Self {
            year: row.year,
            month: u32::try_from(row.month).unwrap_or_default(),
            count: usize::try_from(row.count).unwrap_or_default(),
        }
    }
}
