pub mod product;
pub mod product_feature;
pub mod product_image;
pub mod product_stock;
pub mod product_tag;
pub mod user;
