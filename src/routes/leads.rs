use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, post, put, web};
use chrono::Utc;

use crate::domain::lead::LeadContact;
use crate::dto::leads::{ContactResponse, LeadPage};
use crate::forms::leads::{ContactForm, LeadStatusForm};
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::leads as lead_service;

const NOT_FOUND: &str = "User not found";

/// Public contact form endpoint. A new lead answers `201`, a returning one `200`.
#[post("/chat-users")]
pub async fn contact(
    form: web::Json<ContactForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let form = form.into_inner();
    respond(
        NOT_FOUND,
        move || lead_service::contact_lead(&repo, form, Utc::now().naive_utc()),
        |contact| {
            let mut response = match contact {
                LeadContact::Created(_) => HttpResponse::Created(),
                LeadContact::Returning(_) => HttpResponse::Ok(),
            };
            response.json(ContactResponse::from(contact))
        },
    )
    .await
}

#[get("/chat-users")]
pub async fn list_leads(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let params = params.into_inner();
    respond(
        NOT_FOUND,
        move || lead_service::list_leads(&repo, &params),
        |page| HttpResponse::Ok().json(LeadPage::from(page)),
    )
    .await
}

#[put("/chat-users/{id}")]
pub async fn update_lead_status(
    id: web::Path<i32>,
    form: web::Json<LeadStatusForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let (id, form) = (id.into_inner(), form.into_inner());
    respond(
        NOT_FOUND,
        move || lead_service::update_lead_status(&repo, id, form),
        |lead| HttpResponse::Ok().json(lead),
    )
    .await
}
