//! Lead ("chat user") captured through the storefront contact flow.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CountryName, LeadEmail, LeadId, LeadStatus, LeadUsername, PhoneNumber, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub username: LeadUsername,
    pub phone: PhoneNumber,
    pub country: CountryName,
    pub email: Option<LeadEmail>,
    pub last_contact: NaiveDateTime,
    pub status: LeadStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub username: LeadUsername,
    pub phone: PhoneNumber,
    pub country: CountryName,
    pub email: Option<LeadEmail>,
}

/// Outcome of submitting the contact form.
#[derive(Clone, Debug, PartialEq)]
pub enum LeadContact {
    /// No lead had this phone number yet.
    Created(Lead),
    /// A lead with the same phone exists; its `last_contact` was refreshed.
    Returning(Lead),
}

impl LeadContact {
    pub fn lead(&self) -> &Lead {
        match self {
            LeadContact::Created(lead) | LeadContact::Returning(lead) => lead,
        }
    }
}

impl Lead {
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: i32,
        username: String,
        phone: String,
        country: String,
        email: Option<String>,
        last_contact: NaiveDateTime,
        status: &str,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: LeadId::new(id)?,
            username: LeadUsername::new(username)?,
            phone: PhoneNumber::new(phone)?,
            country: CountryName::new(country)?,
            email: email.map(LeadEmail::new).transpose()?,
            last_contact,
            status: status.parse()?,
            created_at,
            updated_at,
        })
    }
}
