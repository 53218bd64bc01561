use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::level::SkillLevel;
use crate::domain::password::PasswordHash;
use crate::domain::sport::Sport;

/// Registered shopper account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    /// Unique, case-sensitive login name.
    pub username: String,
    /// Salted credential; never serialized.
    #[serde(skip, default = "empty_credential")]
    pub password_hash: PasswordHash,
    /// Preferred sport, if any.
    pub sport: Option<Sport>,
    /// Declared skill level.
    pub level: SkillLevel,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Check a candidate password against the stored credential.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash.verify(password)
    }
}

fn empty_credential() -> PasswordHash {
    PasswordHash::from_stored(String::new())
}

/// Payload required to register a new account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: PasswordHash,
    pub sport: Option<Sport>,
    pub level: SkillLevel,
}

impl NewUser {
    /// Build a registration payload with no sport preference and the default level.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            username: username.into(),
            password_hash,
            sport: None,
            level: SkillLevel::default(),
        }
    }

    pub fn with_sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    pub fn with_level(mut self, level: SkillLevel) -> Self {
        self.level = level;
        self
    }
}

/// Patch data applied to a profile. Only the fields that are `Some` change.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateUser {
    /// New login name.
    pub username: Option<String>,
    pub sport: Option<Sport>,
    pub level: Option<SkillLevel>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateUser {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateUser {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            username: None,
            sport: None,
            level: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    pub fn level(mut self, level: SkillLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.sport.is_none() && self.level.is_none()
    }
}

/// Public view of an account returned by the profile endpoint.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub sport: Option<Sport>,
    pub level: SkillLevel,
}

impl From<User> for UserProfile {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.username,
            sport: value.sport,
            level: value.level,
        }
    }
}
