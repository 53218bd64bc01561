use thiserror::Error;

pub mod level;
pub mod password;
pub mod product;
pub mod product_feature;
pub mod product_image;
pub mod product_stock;
pub mod product_tag;
pub mod sport;
pub mod user;

/// Raised when a textual code does not name a known enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code `{value}`")]
pub struct UnknownCode {
    /// Which enumeration was being parsed (`sport`, `level`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Code and display name pair exposed by the enumeration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Choice {
    pub key: &'static str,
    pub name: &'static str,
}
