use serde::{Deserialize, Serialize};

use crate::domain::level::SkillLevel;
use crate::domain::sport::Sport;

/// Association recording that a product suits a sport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductSportTag {
    /// Identifier of the tagged product.
    pub product_id: String,
    /// Sport the product suits.
    pub sport: Sport,
}

/// Association recording that a product suits a skill level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductLevelTag {
    /// Identifier of the tagged product.
    pub product_id: String,
    /// Skill level the product suits.
    pub level: SkillLevel,
}
