//! Payloads for the contact flow and lead administration.

use serde::Deserialize;

use crate::domain::lead::NewLead;
use crate::domain::types::{CountryName, LeadEmail, LeadStatus, LeadUsername, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize)]
/// Contact details submitted by a storefront visitor.
pub struct ContactForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl TryFrom<ContactForm> for NewLead {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let required = [&form.username, &form.phone, &form.country];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(FormError::MissingContactDetails);
        }

        let email = form
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(LeadEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;

        Ok(NewLead {
            username: LeadUsername::new(form.username).map_err(|_| FormError::InvalidName)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::MissingContactDetails)?,
            country: CountryName::new(form.country)
                .map_err(|_| FormError::MissingContactDetails)?,
            email,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Admin update of a lead's follow-up status.
pub struct LeadStatusForm {
    pub status: String,
}

impl TryFrom<LeadStatusForm> for LeadStatus {
    type Error = FormError;

    fn try_from(form: LeadStatusForm) -> Result<Self, Self::Error> {
        form.status
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            username: " Jane ".to_string(),
            phone: " +1 555 0100 ".to_string(),
            country: "Canada".to_string(),
            email: Some("Jane@Example.com".to_string()),
        }
    }

    #[test]
    fn contact_form_to_new_lead() {
        let lead = NewLead::try_from(form()).unwrap();
        assert_eq!(lead.username.as_str(), "Jane");
        assert_eq!(lead.phone.as_str(), "+1 555 0100");
        assert_eq!(lead.email.unwrap().as_str(), "jane@example.com");
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut missing = form();
        missing.country = "  ".to_string();
        assert!(matches!(
            NewLead::try_from(missing),
            Err(FormError::MissingContactDetails)
        ));

        let mut short = form();
        short.username = "J".to_string();
        assert!(matches!(NewLead::try_from(short), Err(FormError::InvalidName)));
    }

    #[test]
    fn blank_email_is_dropped() {
        let mut blank = form();
        blank.email = Some("   ".to_string());
        assert_eq!(NewLead::try_from(blank).unwrap().email, None);

        let mut invalid = form();
        invalid.email = Some("not-an-email".to_string());
        assert!(matches!(NewLead::try_from(invalid), Err(FormError::InvalidEmail)));
    }

    #[test]
    fn status_form_parses_known_values() {
        let status = LeadStatus::try_from(LeadStatusForm {
            status: "inactive".to_string(),
        });
        assert_eq!(status.unwrap(), LeadStatus::Inactive);
        assert!(
            LeadStatus::try_from(LeadStatusForm {
                status: "all".to_string()
            })
            .is_err()
        );
    }
}
