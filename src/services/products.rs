use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::level::SkillLevel;
use crate::domain::product::{Product, ProductListQuery};
use crate::domain::product_feature::ProductFeature;
use crate::domain::product_image::ProductImage;
use crate::domain::product_stock::ProductStoreStock;
use crate::domain::product_tag::{ProductLevelTag, ProductSportTag};
use crate::domain::sport::Sport;
use crate::forms::products::{
    AddLevelTagForm, AddProductForm, AddSportTagForm, SetFeatureForm, SetImageForm,
    SetStoreStockForm,
};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing.
///
/// Price bounds arrive as raw strings so that malformed numbers can be
/// reported as a validation failure rather than silently dropped.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Substring matched against sport codes.
    pub sport: Option<String>,
    /// Substring matched against level codes.
    pub level: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl ProductsQuery {
    fn into_list_query(self) -> ServiceResult<ProductListQuery> {
        let min_price = parse_bound(self.min_price.as_deref());
        let max_price = parse_bound(self.max_price.as_deref());

        let mut invalid = Vec::new();
        if min_price.is_err() {
            invalid.push("minPrice".to_string());
        }
        if max_price.is_err() {
            invalid.push("maxPrice".to_string());
        }
        if !invalid.is_empty() {
            return Err(ServiceError::Validation(invalid));
        }

        let mut query = ProductListQuery::new();
        if let Some(sport) = self.sport.as_deref() {
            query = query.sport(sport);
        }
        if let Some(level) = self.level.as_deref() {
            query = query.level(level);
        }
        if let Ok(Some(min)) = min_price {
            query = query.min_price(min);
        }
        if let Ok(Some(max)) = max_price {
            query = query.max_price(max);
        }

        Ok(query)
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<Decimal>, rust_decimal::Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Decimal::from_str(value).map(Some),
        None => Ok(None),
    }
}

/// Record returned by the product listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductSummary {
    pub id: String,
    pub sports: Vec<Sport>,
    pub levels: Vec<SkillLevel>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub card_image: Option<String>,
    pub stock_count: i32,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            sports: product.sports,
            levels: product.levels,
            name: product.name,
            price: product.price,
            card_image: product.card_image,
            stock_count: product.stock_count,
        }
    }
}

/// Record returned for a single product, with every owned collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetail {
    pub id: String,
    pub sports: Vec<Sport>,
    pub levels: Vec<SkillLevel>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub card_image: Option<String>,
    pub stock_count: i32,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub warranty_months: i32,
    pub delivery_days: i32,
    pub in_stock: bool,
    pub features: Vec<ProductFeature>,
    pub images: Vec<ProductImage>,
    pub stock_by_store: Vec<ProductStoreStock>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        let Product {
            id,
            sku,
            name,
            description,
            category,
            brand,
            price,
            rating,
            review_count,
            warranty_months,
            delivery_days,
            in_stock,
            stock_count,
            card_image,
            sports,
            levels,
            features,
            images,
            stock_by_store,
            created_at,
            updated_at,
            ..
        } = product;

        Self {
            id,
            sports,
            levels,
            name,
            price,
            card_image,
            stock_count,
            sku,
            description,
            category,
            brand,
            rating,
            review_count,
            warranty_months,
            delivery_days,
            in_stock,
            features,
            images,
            stock_by_store,
            created_at,
            updated_at,
        }
    }
}

/// Lists products matching the query in creation order.
pub fn load_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Vec<ProductSummary>>
where
    R: ProductReader + ?Sized,
{
    let list_query = query.into_list_query()?;
    let products = repo.list_products(list_query).map_err(ServiceError::from)?;

    Ok(products.into_iter().map(ProductSummary::from).collect())
}

/// Loads a single product with its features, images and store stock.
pub fn load_product<R>(repo: &R, product_id: &str) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .map(ProductDetail::from)
        .ok_or(ServiceError::NotFound)
}

/// Validates and stores a new product together with its initial collections.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<ProductDetail>
where
    R: ProductWriter + ?Sized,
{
    let payload = form.into_new_product()?;
    let created = repo
        .create_product(&payload)
        .map_err(ServiceError::from)?;

    log::info!("Created product {} ({})", created.id, created.name);

    Ok(created.into())
}

/// Deletes a product and every row it owns.
pub fn remove_product<R>(repo: &R, product_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id)
        .map_err(ServiceError::from)?;

    log::info!("Deleted product {product_id}");

    Ok(())
}

pub fn add_sport_tag<R>(
    repo: &R,
    product_id: &str,
    form: AddSportTagForm,
) -> ServiceResult<ProductSportTag>
where
    R: ProductWriter + ?Sized,
{
    let sport = form.into_sport()?;
    repo.add_sport_tag(product_id, sport)
        .map_err(ServiceError::from)
}

pub fn add_level_tag<R>(
    repo: &R,
    product_id: &str,
    form: AddLevelTagForm,
) -> ServiceResult<ProductLevelTag>
where
    R: ProductWriter + ?Sized,
{
    let level = form.into_level()?;
    repo.add_level_tag(product_id, level)
        .map_err(ServiceError::from)
}

/// Inserts or replaces the feature at `position`.
pub fn set_feature<R>(
    repo: &R,
    product_id: &str,
    position: i32,
    form: SetFeatureForm,
) -> ServiceResult<ProductFeature>
where
    R: ProductWriter + ?Sized,
{
    let feature = form.into_feature(position)?;
    repo.set_feature(product_id, &feature)
        .map_err(ServiceError::from)
}

/// Inserts or replaces the image at `position`.
pub fn set_image<R>(
    repo: &R,
    product_id: &str,
    position: i32,
    form: SetImageForm,
) -> ServiceResult<ProductImage>
where
    R: ProductWriter + ?Sized,
{
    let image = form.into_image(position)?;
    repo.set_image(product_id, &image)
        .map_err(ServiceError::from)
}

/// Records the stock a store holds for the product.
pub fn set_store_stock<R>(
    repo: &R,
    product_id: &str,
    form: SetStoreStockForm,
) -> ServiceResult<ProductStoreStock>
where
    R: ProductWriter + ?Sized,
{
    let stock = form.into_store_stock()?;
    repo.set_store_stock(product_id, &stock)
        .map_err(ServiceError::from)
}
