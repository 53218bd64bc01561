use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, cents_to_price,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: String,
    pub position: i64,
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_cents: i64,
    pub rating: f64,
    pub review_count: i32,
    pub warranty_months: i32,
    pub delivery_days: i32,
    pub in_stock: bool,
    pub stock_count: i32,
    pub card_image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub position: i64,
    pub sku: Option<&'a str>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub price_cents: i64,
    pub rating: f64,
    pub review_count: i32,
    pub warranty_months: i32,
    pub delivery_days: i32,
    pub in_stock: bool,
    pub stock_count: i32,
    pub card_image: Option<&'a str>,
}

impl<'a> NewProduct<'a> {
    /// Borrow the scalar attributes of a domain payload for insertion.
    pub fn from_domain(
        id: &'a str,
        position: i64,
        price_cents: i64,
        value: &'a DomainNewProduct,
    ) -> Self {
        Self {
            id,
            position,
            sku: value.sku.as_deref(),
            name: value.name.as_str(),
            description: value.description.as_deref(),
            category: value.category.as_deref(),
            brand: value.brand.as_deref(),
            price_cents,
            rating: value.rating,
            review_count: value.review_count,
            warranty_months: value.warranty_months,
            delivery_days: value.delivery_days,
            in_stock: value.in_stock,
            stock_count: value.stock_count,
            card_image: value.card_image.as_deref(),
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            position: value.position,
            sku: value.sku,
            name: value.name,
            description: value.description,
            category: value.category,
            brand: value.brand,
            price: cents_to_price(value.price_cents),
            rating: value.rating,
            review_count: value.review_count,
            warranty_months: value.warranty_months,
            delivery_days: value.delivery_days,
            in_stock: value.in_stock,
            stock_count: value.stock_count,
            card_image: value.card_image,
            sports: Vec::new(),
            levels: Vec::new(),
            features: Vec::new(),
            images: Vec::new(),
            stock_by_store: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
