//! HTTP routes exposing the product catalog.

use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod products;

/// Renders a JSON error body with the given status builder.
fn json_error(mut builder: actix_web::HttpResponseBuilder, message: &str) -> HttpResponse {
    builder.json(json!({ "error": message }))
}

/// Maps a service failure to its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => json_error(HttpResponse::NotFound(), &err.to_string()),
        ServiceError::Form(message) => json_error(HttpResponse::BadRequest(), &message),
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            json_error(HttpResponse::InternalServerError(), "Internal server error")
        }
    }
}

/// Rejects malformed JSON bodies with a 400 in the same error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = json_error(HttpResponse::BadRequest(), &err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Rejects undecodable query strings with a 400 in the same error shape.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = json_error(HttpResponse::BadRequest(), &err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Registers every product route. Shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(products::list_products)
        .service(products::product_stats)
        .service(products::show_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product);
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    #[actix_web::test]
    async fn not_found_renders_json_404() {
        let response = error_response(ServiceError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Product not found");
    }

    #[actix_web::test]
    async fn internal_errors_hide_details() {
        let response = error_response(ServiceError::Internal("lock poisoned".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }

    #[test]
    fn form_errors_are_bad_requests() {
        let response = error_response(ServiceError::Form("invalid name".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
