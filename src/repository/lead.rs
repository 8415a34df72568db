use chrono::{NaiveDateTime, Utc};
use diesel::expression::IntoSql;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::domain::filter::Selection;
use crate::domain::lead::{Lead, NewLead};
use crate::domain::types::{LeadId, LeadStatus, PhoneNumber};
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LeadListQuery, LeadReader, LeadWriter};
use crate::schema::leads;

impl LeadReader for DieselRepository {
    fn get_lead_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;
        let lead = leads::table
            .filter(leads::phone.eq(phone.as_str()))
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(|lead| Lead::try_from(lead).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = leads::table.into_boxed::<Sqlite>();
            match query.filter.status {
                Some(Selection::Exactly(status)) => {
                    items = items.filter(leads::status.eq(status.as_str()));
                }
                Some(Selection::Unmatched) => items = items.filter(false.into_sql::<Bool>()),
                None => {}
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((leads::last_contact.desc(), leads::id.desc()));
        if let Some(page) = &query.pagination {
            let Some((offset, limit)) = page.sql_bounds() else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let leads = items
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(Lead::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, leads))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let lead = diesel::insert_into(leads::table)
            .values(&DbNewLead::from_domain(new_lead, now))
            .get_result::<DbLead>(&mut conn)?;

        Ok(lead.try_into()?)
    }

    fn touch_lead(&self, id: LeadId, contacted_at: NaiveDateTime) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;

        let lead = diesel::update(leads::table.find(id.get()))
            .set((
                leads::last_contact.eq(contacted_at),
                leads::updated_at.eq(contacted_at),
            ))
            .get_result::<DbLead>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        Ok(lead.try_into()?)
    }

    fn update_lead_status(&self, id: LeadId, status: LeadStatus) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;

        let lead = diesel::update(leads::table.find(id.get()))
            .set((
                leads::status.eq(status.as_str()),
                leads::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbLead>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        Ok(lead.try_into()?)
    }
}
