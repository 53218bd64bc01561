use diesel::prelude::*;

use crate::domain::product_stock::ProductStoreStock as DomainProductStoreStock;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_store_stocks,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductStoreStock {
    pub id: i32,
    pub product_id: String,
    pub store: String,
    pub stock: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_store_stocks)]
pub struct NewProductStoreStock<'a> {
    pub product_id: &'a str,
    pub store: &'a str,
    pub stock: i32,
}

impl<'a> NewProductStoreStock<'a> {
    pub fn from_domain(product_id: &'a str, value: &'a DomainProductStoreStock) -> Self {
        Self {
            product_id,
            store: value.store.as_str(),
            stock: value.stock,
        }
    }
}

impl From<ProductStoreStock> for DomainProductStoreStock {
    fn from(value: ProductStoreStock) -> Self {
        Self {
            store: value.store,
            stock: value.stock,
        }
    }
}
