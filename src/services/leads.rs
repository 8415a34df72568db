//! Lead capture and administration.

use chrono::NaiveDateTime;

use crate::domain::lead::{Lead, LeadContact, NewLead};
use crate::domain::types::{LeadId, LeadStatus};
use crate::forms::leads::{ContactForm, LeadStatusForm};
use crate::pagination::{DEFAULT_LEADS_PER_PAGE, Paginated};
use crate::query_builder::{RawParams, build_lead_filter, build_pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Records a contact request.
///
/// Leads are unique by phone number: a known phone refreshes the existing
/// lead's `last_contact` instead of creating a second record.
pub fn contact_lead<R>(repo: &R, form: ContactForm, now: NaiveDateTime) -> ServiceResult<LeadContact>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let new_lead = NewLead::try_from(form).map_err(|err| {
        log::warn!("Rejected contact form: {err}");
        ServiceError::from(err)
    })?;

    if let Some(existing) = repo.get_lead_by_phone(&new_lead.phone)? {
        return touch(repo, existing, now).map(LeadContact::Returning);
    }

    match repo.create_lead(&new_lead) {
        Ok(lead) => {
            log::info!("Captured new lead {} from {}", lead.id, lead.country);
            Ok(LeadContact::Created(lead))
        }
        // Another request stored the same phone in between.
        Err(RepositoryError::Duplicate(_)) => {
            let existing = repo
                .get_lead_by_phone(&new_lead.phone)?
                .ok_or(ServiceError::NotFound)?;
            touch(repo, existing, now).map(LeadContact::Returning)
        }
        Err(err) => {
            log::error!("Failed to create lead: {err}");
            Err(err.into())
        }
    }
}

fn touch<R>(repo: &R, lead: Lead, now: NaiveDateTime) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let lead = repo.touch_lead(lead.id, now).map_err(|err| {
        log::error!("Failed to refresh lead {}: {err}", lead.id);
        ServiceError::from(err)
    })?;
    log::info!("Returning lead {} contacted again", lead.id);
    Ok(lead)
}

/// Lists leads, most recently contacted first.
pub fn list_leads<R>(repo: &R, params: &RawParams) -> ServiceResult<Paginated<Lead>>
where
    R: LeadReader + ?Sized,
{
    let filter = build_lead_filter(params);
    let page = build_pagination(params, DEFAULT_LEADS_PER_PAGE);

    let (total, leads) = repo
        .list_leads(LeadListQuery::new(filter).paginate(page))
        .map_err(|err| {
            log::error!("Failed to list leads: {err}");
            err
        })?;

    Ok(Paginated::new(leads, total, page))
}

pub fn update_lead_status<R>(repo: &R, id: i32, form: LeadStatusForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let id = LeadId::new(id).map_err(|_| ServiceError::NotFound)?;
    let status = LeadStatus::try_from(form)?;

    let lead = repo.update_lead_status(id, status).map_err(|err| {
        log::error!("Failed to update status of lead {id}: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Lead {id} marked {status}");
    Ok(lead)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::filter::Selection;
    use crate::repository::mock::MockRepository;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid timestamp")
    }

    fn build_lead(id: i32, last_contact: NaiveDateTime) -> Lead {
        Lead::try_new(
            id,
            "Jane".to_string(),
            "555-0100".to_string(),
            "Canada".to_string(),
            None,
            last_contact,
            "active",
            last_contact,
            last_contact,
        )
        .expect("valid lead")
    }

    fn form() -> ContactForm {
        ContactForm {
            username: "Jane".to_string(),
            phone: "555-0100".to_string(),
            country: "Canada".to_string(),
            email: None,
        }
    }

    #[test]
    fn new_phone_creates_lead() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_phone().times(1).returning(|_| Ok(None));
        repo.expect_create_lead()
            .withf(|lead| lead.phone.as_str() == "555-0100")
            .times(1)
            .returning(|_| Ok(build_lead(1, now())));
        repo.expect_touch_lead().times(0);

        let outcome = contact_lead(&repo, form(), now()).unwrap();
        assert!(matches!(outcome, LeadContact::Created(_)));
    }

    #[test]
    fn known_phone_refreshes_last_contact() {
        let earlier = now() - Duration::days(3);
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_phone()
            .times(1)
            .returning(move |_| Ok(Some(build_lead(4, earlier))));
        repo.expect_create_lead().times(0);
        repo.expect_touch_lead()
            .withf(|id, at| id.get() == 4 && *at == now())
            .times(1)
            .returning(|id, at| Ok(build_lead(id.get(), at)));

        let outcome = contact_lead(&repo, form(), now()).unwrap();
        assert!(matches!(&outcome, LeadContact::Returning(_)));
        assert_eq!(outcome.lead().last_contact, now());
    }

    #[test]
    fn concurrent_duplicate_becomes_returning() {
        let mut repo = MockRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_get_lead_by_phone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_create_lead()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RepositoryError::Duplicate("leads.phone".to_string())));
        repo.expect_get_lead_by_phone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(build_lead(7, now()))));
        repo.expect_touch_lead()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id, at| Ok(build_lead(id.get(), at)));

        let outcome = contact_lead(&repo, form(), now()).unwrap();
        assert!(matches!(outcome, LeadContact::Returning(lead) if lead.id.get() == 7));
    }

    #[test]
    fn incomplete_contact_form_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_phone().times(0);

        let mut incomplete = form();
        incomplete.phone = String::new();

        assert!(matches!(
            contact_lead(&repo, incomplete, now()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn list_leads_uses_lead_page_size() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .withf(|query| {
                query.filter.status == Some(Selection::Exactly(LeadStatus::Blocked))
                    && query.pagination.is_some_and(|page| page.limit == DEFAULT_LEADS_PER_PAGE)
            })
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let params: RawParams = [("status".to_string(), "blocked".to_string())]
            .into_iter()
            .collect();
        let page = list_leads(&repo, &params).unwrap();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn update_status_rejects_unknown_value() {
        let mut repo = MockRepository::new();
        repo.expect_update_lead_status().times(0);

        let result = update_lead_status(
            &repo,
            1,
            LeadStatusForm {
                status: "vip".to_string(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
