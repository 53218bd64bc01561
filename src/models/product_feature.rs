use diesel::prelude::*;

use crate::domain::product_feature::ProductFeature as DomainProductFeature;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_features,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductFeature {
    pub id: i32,
    pub product_id: String,
    pub position: i32,
    pub content: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_features)]
pub struct NewProductFeature<'a> {
    pub product_id: &'a str,
    pub position: i32,
    pub content: &'a str,
}

impl<'a> NewProductFeature<'a> {
    pub fn from_domain(product_id: &'a str, value: &'a DomainProductFeature) -> Self {
        Self {
            product_id,
            position: value.position,
            content: value.text.as_str(),
        }
    }
}

impl From<ProductFeature> for DomainProductFeature {
    fn from(value: ProductFeature) -> Self {
        Self {
            position: value.position,
            text: value.content,
        }
    }
}
