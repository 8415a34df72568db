//! Lead response bodies.

use serde::Serialize;

use crate::domain::lead::{Lead, LeadContact};
use crate::pagination::Paginated;

pub const NEW_LEAD_MESSAGE: &str = "Thank you! We will contact you soon.";
pub const RETURNING_LEAD_MESSAGE: &str = "Welcome back! We will contact you soon.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPage {
    pub users: Vec<Lead>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total: usize,
}

impl From<Paginated<Lead>> for LeadPage {
    fn from(page: Paginated<Lead>) -> Self {
        Self {
            users: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total: page.total,
        }
    }
}

/// Acknowledgement returned to the visitor after the contact form.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub user: Lead,
}

impl From<LeadContact> for ContactResponse {
    fn from(contact: LeadContact) -> Self {
        match contact {
            LeadContact::Created(user) => Self {
                message: NEW_LEAD_MESSAGE,
                user,
            },
            LeadContact::Returning(user) => Self {
                message: RETURNING_LEAD_MESSAGE,
                user,
            },
        }
    }
}
