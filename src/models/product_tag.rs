use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_sports,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductSport {
    pub id: i32,
    pub product_id: String,
    pub sport: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_sports)]
pub struct NewProductSport<'a> {
    pub product_id: &'a str,
    pub sport: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_levels,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductLevel {
    pub id: i32,
    pub product_id: String,
    pub level: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_levels)]
pub struct NewProductLevel<'a> {
    pub product_id: &'a str,
    pub level: &'a str,
}
