use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::password::PasswordHash;
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub sport: Option<String>,
    pub level: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub sport: Option<&'a str>,
    pub level: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub username: Option<&'a str>,
    pub sport: Option<&'a str>,
    pub level: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<User> for DomainUser {
    fn from(value: User) -> Self {
        // Codes are constrained by CHECKs in the schema; anything else is
        // treated as unset.
        let sport = value.sport.as_deref().and_then(|code| code.parse().ok());
        let level = value.level.parse().unwrap_or_else(|_| {
            log::warn!(
                "User {} has unknown level `{}`, using default",
                value.id,
                value.level
            );
            Default::default()
        });

        Self {
            id: value.id,
            username: value.username,
            password_hash: PasswordHash::from_stored(value.password_hash),
            sport,
            level,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(value: &'a DomainNewUser) -> Self {
        Self {
            username: value.username.as_str(),
            password_hash: value.password_hash.as_str(),
            sport: value.sport.map(|sport| sport.code()),
            level: value.level.code(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(value: &'a DomainUpdateUser) -> Self {
        Self {
            username: value.username.as_deref(),
            sport: value.sport.map(|sport| sport.code()),
            level: value.level.map(|level| level.code()),
            updated_at: value.updated_at,
        }
    }
}
