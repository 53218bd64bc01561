use serde::{Deserialize, Serialize};

/// Gallery image attached to a product, unique per position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Display order within the gallery.
    pub position: i32,
    /// Absolute URL of the image.
    pub url: String,
    /// Whether this image is used on product cards.
    pub is_card: bool,
}

impl ProductImage {
    pub fn new(position: i32, url: impl Into<String>, is_card: bool) -> Self {
        Self {
            position,
            url: url.into(),
            is_card,
        }
    }
}
