use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::products::ProductsQueryParams;
use crate::forms::product::{ProductForm, UpdateProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::InMemoryRepository;
use crate::routes::error_response;
use crate::services::products as products_service;

#[get("/products")]
/// List products with optional `category`, `search`, `page` and `limit`.
///
/// The query string is read as raw pairs so repeated keys do not fail the
/// request.
pub async fn list_products(
    pairs: web::Query<Vec<(String, String)>>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    let params: ProductsQueryParams = pairs.into_inner().into_iter().collect();
    match products_service::list_products(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/products/stats/count")]
/// Number of products per category.
pub async fn product_stats(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match products_service::product_stats(repo.get_ref()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    match products_service::get_product(repo.get_ref(), &id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    match products_service::create_product(repo.get_ref(), &user, form) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<UpdateProductForm>,
) -> impl Responder {
    match products_service::update_product(repo.get_ref(), &user, &id, form) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    match products_service::delete_product(repo.get_ref(), &user, &id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
