use crate::domain::Choice;
use crate::domain::level::SkillLevel;
use crate::domain::sport::Sport;

/// Every sport a product or a profile can reference.
pub fn list_sports() -> Vec<Choice> {
    Sport::choices()
}

/// Every skill level, from beginner to expert.
pub fn list_levels() -> Vec<Choice> {
    SkillLevel::choices()
}
