use lazy_static::lazy_static;

use crate::domain::password::{PasswordError, PasswordHash};
use crate::domain::user::{NewUser, User, UserProfile};
use crate::forms::users::{LoginForm, RegisterForm, UpdateProfileForm};
use crate::repository::{RepositoryError, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

lazy_static! {
    /// Verified against when the username is unknown so that both failure
    /// paths of `authenticate_user` do the same amount of work.
    static ref DUMMY_HASH: Option<PasswordHash> =
        PasswordHash::hash("catalog-dummy-password").ok();
}

fn map_user_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Conflict(_) => ServiceError::DuplicateUser,
        other => ServiceError::from(other),
    }
}

/// Creates a new account after checking the username is free.
pub fn register_user<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let registration = form.into_registration()?;

    let password_hash = PasswordHash::hash(&registration.password).map_err(|err| match err {
        PasswordError::Empty => ServiceError::Validation(vec!["password".to_string()]),
        PasswordError::Hash => ServiceError::Internal(err.to_string()),
    })?;

    let mut new_user = NewUser::new(registration.username, password_hash)
        .with_level(registration.level);
    if let Some(sport) = registration.sport {
        new_user = new_user.with_sport(sport);
    }

    let user = repo.create_user(&new_user).map_err(map_user_conflict)?;

    log::info!("Registered user {}", user.username);

    Ok(user)
}

/// Checks credentials and returns the account identifier.
///
/// An unknown username and a wrong password both produce
/// `ServiceError::InvalidCredentials`.
pub fn authenticate_user<R>(repo: &R, form: LoginForm) -> ServiceResult<i32>
where
    R: UserReader + ?Sized,
{
    let user = repo
        .get_user_by_username(&form.name)
        .map_err(ServiceError::from)?;

    match user {
        Some(user) if user.verify_password(&form.password) => Ok(user.id),
        Some(_) => Err(ServiceError::InvalidCredentials),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_ref() {
                let _ = dummy.verify(&form.password);
            }
            Err(ServiceError::InvalidCredentials)
        }
    }
}

pub fn load_profile<R>(repo: &R, username: &str) -> ServiceResult<UserProfile>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_username(username)
        .map_err(ServiceError::from)?
        .map(UserProfile::from)
        .ok_or(ServiceError::NotFound)
}

/// Applies a partial profile update. Only the supplied fields change.
pub fn update_profile<R>(
    repo: &R,
    username: &str,
    form: UpdateProfileForm,
) -> ServiceResult<UserProfile>
where
    R: UserReader + UserWriter + ?Sized,
{
    let updates = form.into_update()?;

    if updates.is_empty() {
        return load_profile(repo, username);
    }

    let user = repo
        .update_user(username, &updates)
        .map_err(map_user_conflict)?;

    if user.username != username {
        log::info!("Renamed user {username} to {}", user.username);
    }

    Ok(user.into())
}
