//! Diesel models for captured leads.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub username: String,
    pub phone: String,
    pub country: String,
    pub email: Option<String>,
    pub last_contact: NaiveDateTime,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub username: &'a str,
    pub phone: &'a str,
    pub country: &'a str,
    pub email: Option<&'a str>,
    pub last_contact: NaiveDateTime,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        DomainLead::try_new(
            lead.id,
            lead.username,
            lead.phone,
            lead.country,
            lead.email,
            lead.last_contact,
            &lead.status,
            lead.created_at,
            lead.updated_at,
        )
    }
}

impl<'a> NewLead<'a> {
    pub fn from_domain(lead: &'a DomainNewLead, now: NaiveDateTime) -> Self {
        Self {
            username: lead.username.as_str(),
            phone: lead.phone.as_str(),
            country: lead.country.as_str(),
            email: lead.email.as_ref().map(|email| email.as_str()),
            last_contact: now,
            status: crate::domain::types::LeadStatus::default().as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}
