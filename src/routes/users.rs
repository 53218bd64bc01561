use actix_web::{HttpResponse, Responder, get, post, put, web};
use serde::Serialize;

use crate::forms::users::{LoginForm, RegisterForm, UpdateProfileForm};
use crate::repository::DieselRepository;
use crate::routes::api::{ErrorBody, internal_error};
use crate::services::{ServiceError, users};

const USER_EXISTS: &str = "Utilisateur existant";
const USER_NOT_FOUND: &str = "Utilisateur non existant";
const INVALID_CREDENTIALS: &str = "Identifiants invalides";
const INVALID_FIELDS: &str = "Champs invalides";

/// Body returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i32,
}

fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::DuplicateUser => HttpResponse::BadRequest().json(ErrorBody::new(USER_EXISTS)),
        ServiceError::InvalidCredentials => {
            HttpResponse::BadRequest().json(ErrorBody::new(INVALID_CREDENTIALS))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new(USER_NOT_FOUND)),
        ServiceError::Validation(fields) => {
            HttpResponse::BadRequest().json(ErrorBody::with_fields(INVALID_FIELDS, fields))
        }
        err => internal_error(context, &err),
    }
}

#[post("/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    match users::register_user(repo.get_ref(), form.into_inner()) {
        Ok(_) => HttpResponse::Ok().json("success"),
        Err(err) => error_response("Failed to register user", err),
    }
}

#[post("/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match users::authenticate_user(repo.get_ref(), form.into_inner()) {
        Ok(id) => HttpResponse::Ok().json(LoginResponse { id }),
        Err(err) => error_response("Failed to authenticate user", err),
    }
}

#[get("/user/{name}")]
pub async fn show_profile(
    name: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::load_profile(repo.get_ref(), &name) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response("Failed to load profile", err),
    }
}

#[put("/user/{name}")]
pub async fn update_profile(
    name: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProfileForm>,
) -> impl Responder {
    match users::update_profile(repo.get_ref(), &name, form.into_inner()) {
        Ok(_) => HttpResponse::Ok().json("Success"),
        Err(err) => error_response("Failed to update profile", err),
    }
}
