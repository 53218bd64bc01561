use diesel::prelude::*;

use crate::domain::product_image::ProductImage as DomainProductImage;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_images,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: String,
    pub position: i32,
    pub url: String,
    pub is_card: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: &'a str,
    pub position: i32,
    pub url: &'a str,
    pub is_card: bool,
}

impl<'a> NewProductImage<'a> {
    pub fn from_domain(product_id: &'a str, value: &'a DomainProductImage) -> Self {
        Self {
            product_id,
            position: value.position,
            url: value.url.as_str(),
            is_card: value.is_card,
        }
    }
}

impl From<ProductImage> for DomainProductImage {
    fn from(value: ProductImage) -> Self {
        Self {
            position: value.position,
            url: value.url,
            is_card: value.is_card,
        }
    }
}
