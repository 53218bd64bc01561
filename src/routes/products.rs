use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{
    AddLevelTagForm, AddProductForm, AddSportTagForm, SetFeatureForm, SetImageForm,
    SetStoreStockForm,
};
use crate::repository::DieselRepository;
use crate::routes::api::{ErrorBody, internal_error};
use crate::services::{ServiceError, products};

const PRODUCT_NOT_FOUND: &str = "Could not find product";

/// Maps product service failures onto HTTP responses.
fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(fields) => {
            HttpResponse::BadRequest().json(ErrorBody::with_fields("Invalid product", fields))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new(PRODUCT_NOT_FOUND)),
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(ErrorBody::new(message)),
        err => internal_error(context, &err),
    }
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::load_products(repo.get_ref(), params.into_inner()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(ServiceError::Validation(fields)) => HttpResponse::BadRequest()
            .json(ErrorBody::with_fields("Invalid price bounds", fields)),
        Err(err) => error_response("Failed to list products", err),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response("Failed to create product", err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::load_product(repo.get_ref(), &product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("Failed to load product", err),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::remove_product(repo.get_ref(), &product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response("Failed to delete product", err),
    }
}

#[post("/products/{product_id}/sports")]
pub async fn add_sport_tag(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddSportTagForm>,
) -> impl Responder {
    match products::add_sport_tag(repo.get_ref(), &product_id, form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(err) => error_response("Failed to tag product with sport", err),
    }
}

#[post("/products/{product_id}/levels")]
pub async fn add_level_tag(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddLevelTagForm>,
) -> impl Responder {
    match products::add_level_tag(repo.get_ref(), &product_id, form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(err) => error_response("Failed to tag product with level", err),
    }
}

#[put("/products/{product_id}/features/{position}")]
pub async fn set_feature(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
    form: web::Json<SetFeatureForm>,
) -> impl Responder {
    let (product_id, position) = path.into_inner();
    match products::set_feature(repo.get_ref(), &product_id, position, form.into_inner()) {
        Ok(feature) => HttpResponse::Ok().json(feature),
        Err(err) => error_response("Failed to set product feature", err),
    }
}

#[put("/products/{product_id}/images/{position}")]
pub async fn set_image(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
    form: web::Json<SetImageForm>,
) -> impl Responder {
    let (product_id, position) = path.into_inner();
    match products::set_image(repo.get_ref(), &product_id, position, form.into_inner()) {
        Ok(image) => HttpResponse::Ok().json(image),
        Err(err) => error_response("Failed to set product image", err),
    }
}

#[put("/products/{product_id}/stock")]
pub async fn set_store_stock(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<SetStoreStockForm>,
) -> impl Responder {
    match products::set_store_stock(repo.get_ref(), &product_id, form.into_inner()) {
        Ok(stock) => HttpResponse::Ok().json(stock),
        Err(err) => error_response("Failed to set store stock", err),
    }
}
