use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::products::{MessageResponse, ProductPage};
use crate::forms::products::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::products as product_service;

const NOT_FOUND: &str = "Product not found";

#[get("/products")]
pub async fn list_products(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let params = params.into_inner();
    respond(
        NOT_FOUND,
        move || product_service::list_products(&repo, &params),
        |page| HttpResponse::Ok().json(ProductPage::from(page)),
    )
    .await
}

#[get("/products/featured")]
pub async fn featured_products(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.get_ref().clone();
    respond(
        NOT_FOUND,
        move || product_service::list_featured_products(&repo),
        |products| HttpResponse::Ok().json(products),
    )
    .await
}

#[get("/products/{id}")]
pub async fn show_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    respond(
        NOT_FOUND,
        move || product_service::get_product(&repo, id),
        |product| HttpResponse::Ok().json(product),
    )
    .await
}

#[post("/products")]
pub async fn create_product(
    form: web::Json<ProductForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let form = form.into_inner();
    respond(
        NOT_FOUND,
        move || product_service::create_product(&repo, form),
        |product| HttpResponse::Created().json(product),
    )
    .await
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<i32>,
    form: web::Json<ProductForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let (id, form) = (id.into_inner(), form.into_inner());
    respond(
        NOT_FOUND,
        move || product_service::update_product(&repo, id, form),
        |product| HttpResponse::Ok().json(product),
    )
    .await
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    respond(
        NOT_FOUND,
        move || product_service::delete_product(&repo, id),
        |()| HttpResponse::Ok().json(MessageResponse::new("Product removed")),
    )
    .await
}
