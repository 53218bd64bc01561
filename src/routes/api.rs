use actix_web::{HttpResponse, error, web};
use serde::Serialize;

use crate::routes::{choices, products, users};
use crate::services::ServiceError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(error: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            error: error.into(),
            fields,
        }
    }
}

/// Logs an unexpected failure and answers with a bare 500.
pub(crate) fn internal_error(context: &str, err: &ServiceError) -> HttpResponse {
    log::error!("{context}: {err}");
    HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
}

/// Registers every handler together with JSON-shaped extractor errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .service(choices::list_sports)
    .service(choices::list_levels)
    .service(products::list_products)
    .service(products::create_product)
    .service(products::show_product)
    .service(products::delete_product)
    .service(products::add_sport_tag)
    .service(products::add_level_tag)
    .service(products::set_feature)
    .service(products::set_image)
    .service(products::set_store_stock)
    .service(users::register)
    .service(users::login)
    .service(users::show_profile)
    .service(users::update_profile);
}
