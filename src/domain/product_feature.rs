use serde::{Deserialize, Serialize};

/// Selling point displayed on the product page, unique per position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductFeature {
    pub position: i32,
    pub text: String,
}

impl ProductFeature {
    pub fn new(position: i32, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}
