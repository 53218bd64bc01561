use serde::{Deserialize, Serialize};

/// Units of a product held by a single store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductStoreStock {
    pub store: String,
    pub stock: i32,
}

impl ProductStoreStock {
    pub fn new(store: impl Into<String>, stock: i32) -> Self {
        Self {
            store: store.into(),
            stock,
        }
    }
}
