use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Choice, UnknownCode};

/// Skill level a product suits or a user declares.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkillLevel {
    Average,
    #[default]
    Beginner,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Average,
        SkillLevel::Beginner,
        SkillLevel::Expert,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SkillLevel::Average => "AVERAGE",
            SkillLevel::Beginner => "BEGINNER",
            SkillLevel::Expert => "EXPERT",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SkillLevel::Average => "Confirmé",
            SkillLevel::Beginner => "Débutant",
            SkillLevel::Expert => "Expert",
        }
    }

    /// Code/name pairs ordered from novice to expert.
    pub fn choices() -> Vec<Choice> {
        [
            SkillLevel::Beginner,
            SkillLevel::Average,
            SkillLevel::Expert,
        ]
        .iter()
        .map(|level| Choice {
            key: level.code(),
            name: level.display_name(),
        })
        .collect()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCode {
                kind: "level",
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_beginner() {
        assert_eq!(SkillLevel::default(), SkillLevel::Beginner);
    }

    #[test]
    fn parses_known_codes() {
        assert_eq!("expert".parse::<SkillLevel>(), Ok(SkillLevel::Expert));
        assert!("PRO".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn choices_start_with_beginner() {
        let choices = SkillLevel::choices();

        assert_eq!(choices.first().map(|choice| choice.key), Some("BEGINNER"));
        assert_eq!(choices.len(), 3);
    }
}
