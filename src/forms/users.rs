use serde::Deserialize;
use validator::Validate;

use crate::domain::level::SkillLevel;
use crate::domain::sport::Sport;
use crate::domain::user::UpdateUser;
use crate::forms::{FormResult, InvalidFields, sanitize_inline_text};

/// Maximum allowed length for a login name.
const USERNAME_MAX_LEN: u64 = 64;

/// Maximum accepted password length, in bytes.
const PASSWORD_MAX_LEN: u64 = 1024;

/// Payload accepted by the registration endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = USERNAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = PASSWORD_MAX_LEN))]
    pub password: String,
    /// Preferred sport code; blank means no preference.
    pub sport: Option<String>,
    /// Skill level code; defaults to beginner when blank.
    #[serde(rename = "niveauSportif", alias = "level")]
    pub level: Option<String>,
}

/// Validated registration data. The password is still in clear text and is
/// hashed by the identity service.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub sport: Option<Sport>,
    pub level: SkillLevel,
}

impl RegisterForm {
    pub fn into_registration(self) -> FormResult<Registration> {
        let mut invalid = InvalidFields::from_validation(self.validate());

        let username = sanitize_inline_text(&self.name);
        invalid.check(!username.is_empty(), "name");

        let sport = parse_optional::<Sport>(self.sport.as_deref(), "sport", &mut invalid);
        let level = parse_optional::<SkillLevel>(self.level.as_deref(), "level", &mut invalid);

        invalid.finish()?;

        Ok(Registration {
            username,
            password: self.password,
            sport,
            level: level.unwrap_or_default(),
        })
    }
}

/// Credentials submitted to the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

/// Partial profile update. Absent or blank sport/level leave the stored value
/// untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = USERNAME_MAX_LEN))]
    pub name: Option<String>,
    pub sport: Option<String>,
    #[serde(alias = "niveauSportif")]
    pub level: Option<String>,
}

impl UpdateProfileForm {
    pub fn into_update(self) -> FormResult<UpdateUser> {
        let mut invalid = InvalidFields::from_validation(self.validate());

        let username = self.name.as_deref().map(sanitize_inline_text);
        if let Some(name) = username.as_deref() {
            invalid.check(!name.is_empty(), "name");
        }

        let sport = parse_optional::<Sport>(self.sport.as_deref(), "sport", &mut invalid);
        let level = parse_optional::<SkillLevel>(self.level.as_deref(), "level", &mut invalid);

        invalid.finish()?;

        let mut update = UpdateUser::new();
        if let Some(name) = username {
            update = update.username(name);
        }
        if let Some(sport) = sport {
            update = update.sport(sport);
        }
        if let Some(level) = level {
            update = update.level(level);
        }

        Ok(update)
    }
}

fn parse_optional<T>(raw: Option<&str>, field: &str, invalid: &mut InvalidFields) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = raw.map(str::trim).filter(|value| !value.is_empty())?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            invalid.push(field);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_reads_french_level_key() {
        let form: RegisterForm = serde_json::from_str(
            r#"{"name":" bob ","password":"pw","sport":"TENNIS","niveauSportif":"EXPERT"}"#,
        )
        .expect("valid json");

        let registration = form.into_registration().expect("valid registration");

        assert_eq!(registration.username, "bob");
        assert_eq!(registration.sport, Some(Sport::Tennis));
        assert_eq!(registration.level, SkillLevel::Expert);
    }

    #[test]
    fn register_and_rename_normalize_names_alike() {
        let registration = RegisterForm {
            name: " a  \t b ".to_string(),
            password: "pw".to_string(),
            ..RegisterForm::default()
        }
        .into_registration()
        .expect("valid registration");

        let update = UpdateProfileForm {
            name: Some(" a  \t b ".to_string()),
            ..UpdateProfileForm::default()
        }
        .into_update()
        .expect("valid update");

        assert_eq!(registration.username, "a b");
        assert_eq!(update.username.as_deref(), Some("a b"));
    }

    #[test]
    fn register_form_defaults_level_and_sport() {
        let form = RegisterForm {
            name: "alice".to_string(),
            password: "secret".to_string(),
            sport: Some("".to_string()),
            level: None,
        };

        let registration = form.into_registration().expect("valid registration");

        assert_eq!(registration.sport, None);
        assert_eq!(registration.level, SkillLevel::Beginner);
    }

    #[test]
    fn register_form_rejects_blank_credentials() {
        let form = RegisterForm {
            name: "   ".to_string(),
            password: String::new(),
            sport: Some("CURLING".to_string()),
            level: None,
        };

        let err = form.into_registration().expect_err("invalid registration");

        assert_eq!(
            err.fields(),
            ["name".to_string(), "password".to_string(), "sport".to_string()]
        );
    }

    #[test]
    fn update_form_only_sets_present_fields() {
        let form = UpdateProfileForm {
            level: Some("expert".to_string()),
            sport: Some("  ".to_string()),
            ..UpdateProfileForm::default()
        };

        let update = form.into_update().expect("valid update");

        assert_eq!(update.level, Some(SkillLevel::Expert));
        assert_eq!(update.sport, None);
        assert_eq!(update.username, None);
    }

    #[test]
    fn update_form_rejects_blank_name() {
        let form = UpdateProfileForm {
            name: Some("  ".to_string()),
            ..UpdateProfileForm::default()
        };

        let err = form.into_update().expect_err("blank name");

        assert_eq!(err.fields(), ["name".to_string()]);
    }
}
