use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Choice, UnknownCode};

/// Sports a product can be tagged with or a user can prefer.
///
/// Variants are declared in code order so the derived `Ord` matches the
/// alphabetical ordering of the stored codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    Badminton,
    Basketball,
    Cyclisme,
    Football,
    Musculation,
    Natation,
    Randonnee,
    Running,
    Tennis,
    Yoga,
}

impl Sport {
    /// Every sport, in code order.
    pub const ALL: [Sport; 10] = [
        Sport::Badminton,
        Sport::Basketball,
        Sport::Cyclisme,
        Sport::Football,
        Sport::Musculation,
        Sport::Natation,
        Sport::Randonnee,
        Sport::Running,
        Sport::Tennis,
        Sport::Yoga,
    ];

    /// Stored code of the sport.
    pub fn code(self) -> &'static str {
        match self {
            Sport::Badminton => "BADMINTON",
            Sport::Basketball => "BASKETBALL",
            Sport::Cyclisme => "CYCLISME",
            Sport::Football => "FOOTBALL",
            Sport::Musculation => "MUSCULATION",
            Sport::Natation => "NATATION",
            Sport::Randonnee => "RANDONNEE",
            Sport::Running => "RUNNING",
            Sport::Tennis => "TENNIS",
            Sport::Yoga => "YOGA",
        }
    }

    /// Human-readable label shown to shoppers.
    pub fn display_name(self) -> &'static str {
        match self {
            Sport::Badminton => "Badminton",
            Sport::Basketball => "Basketball",
            Sport::Cyclisme => "Cyclisme",
            Sport::Football => "Football",
            Sport::Musculation => "Musculation",
            Sport::Natation => "Natation",
            Sport::Randonnee => "Randonnée",
            Sport::Running => "Course à pied",
            Sport::Tennis => "Tennis",
            Sport::Yoga => "Yoga",
        }
    }

    /// Code/name pairs for every sport.
    pub fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .map(|sport| Choice {
                key: sport.code(),
                name: sport.display_name(),
            })
            .collect()
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sport {
    type Err = UnknownCode;

    /// Parses a sport code, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|sport| sport.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCode {
                kind: "sport",
                value: value.to_string(),
            })
    }
}
