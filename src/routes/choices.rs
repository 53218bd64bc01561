use actix_web::{HttpResponse, Responder, get};

use crate::services::choices;

#[get("/sports")]
pub async fn list_sports() -> impl Responder {
    HttpResponse::Ok().json(choices::list_sports())
}

#[get("/levels")]
pub async fn list_levels() -> impl Responder {
    HttpResponse::Ok().json(choices::list_levels())
}
