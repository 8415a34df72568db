use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;

use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::analytics as analytics_service;

#[get("/admin/stats")]
pub async fn dashboard_stats(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.get_ref().clone();
    respond(
        "Not found",
        move || analytics_service::compute_dashboard_stats(&repo),
        |stats| HttpResponse::Ok().json(stats),
    )
    .await
}

/// `?period=24h|7d|30d|90d`, defaulting to `7d`.
#[get("/admin/overview")]
pub async fn overview(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let period = params.into_inner().remove("period");
    respond(
        "Not found",
        move || {
            analytics_service::compute_overview(&repo, period.as_deref(), Utc::now().naive_utc())
        },
        |overview| HttpResponse::Ok().json(overview),
    )
    .await
}
