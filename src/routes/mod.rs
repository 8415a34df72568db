//! HTTP handlers for the JSON API.

use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod admin;
pub mod leads;
pub mod products;

/// Maps a service failure onto the JSON error contract. `not_found` names the
/// missing entity, e.g. "Product not found".
pub fn error_response(err: &ServiceError, not_found: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "message": not_found })),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        ServiceError::Repository(err) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(json!({"message": "Server error"}))
        }
    }
}

/// Runs a blocking service call off the async executor and renders the result.
pub(crate) async fn respond<T, F, M>(not_found: &str, call: F, render: M) -> HttpResponse
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
    M: FnOnce(T) -> HttpResponse,
{
    match web::block(call).await {
        Ok(Ok(value)) => render(value),
        Ok(Err(err)) => error_response(&err, not_found),
        Err(err) => {
            log::error!("Blocking task failed: {err}");
            HttpResponse::InternalServerError().json(json!({"message": "Server error"}))
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn service_errors_map_to_status_codes() {
        let status = |err: ServiceError| error_response(&err, "Product not found").status();
        assert_eq!(status(ServiceError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ServiceError::Form("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ServiceError::Repository(RepositoryError::ConnectionError(
                "pool".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
