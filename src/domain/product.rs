use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::level::SkillLevel;
use crate::domain::product_feature::ProductFeature;
use crate::domain::product_image::ProductImage;
use crate::domain::product_stock::ProductStoreStock;
use crate::domain::sport::Sport;

/// Number of fractional digits kept for prices.
pub const PRICE_SCALE: u32 = 2;

/// Domain representation of a catalog product together with its owned
/// collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Opaque identifier of the product.
    pub id: String,
    /// Creation sequence number; defines the stable listing order.
    pub position: i64,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    /// Optional catalog category (e.g. `CHAUSSURES`).
    pub category: Option<String>,
    /// Optional brand name.
    pub brand: Option<String>,
    /// Unit price with two fractional digits.
    pub price: Decimal,
    /// Average review rating.
    pub rating: f64,
    /// Number of reviews behind `rating`.
    pub review_count: i32,
    /// Warranty duration in months.
    pub warranty_months: i32,
    /// Expected delivery delay in days.
    pub delivery_days: i32,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// Total units available.
    pub stock_count: i32,
    /// Optional URL of the image used on product cards.
    pub card_image: Option<String>,
    /// Sports the product suits, sorted by code.
    pub sports: Vec<Sport>,
    /// Skill levels the product suits, sorted by code.
    pub levels: Vec<SkillLevel>,
    /// Selling points ordered by position.
    pub features: Vec<ProductFeature>,
    /// Gallery images ordered by position.
    pub images: Vec<ProductImage>,
    /// Stock held by each physical store.
    pub stock_by_store: Vec<ProductStoreStock>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product with its initial collections.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Caller-chosen identifier; a UUID is generated when absent.
    pub id: Option<String>,
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub rating: f64,
    pub review_count: i32,
    pub warranty_months: i32,
    pub delivery_days: i32,
    pub in_stock: bool,
    pub stock_count: i32,
    pub card_image: Option<String>,
    pub sports: Vec<Sport>,
    pub levels: Vec<SkillLevel>,
    pub features: Vec<ProductFeature>,
    pub images: Vec<ProductImage>,
    pub stock_by_store: Vec<ProductStoreStock>,
}

impl NewProduct {
    /// Build a product payload with the given name and default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            sku: None,
            name: name.into(),
            description: None,
            category: None,
            brand: None,
            price: Decimal::ZERO,
            rating: 0.0,
            review_count: 0,
            warranty_months: 0,
            delivery_days: 0,
            in_stock: false,
            stock_count: 0,
            card_image: None,
            sports: Vec::new(),
            levels: Vec::new(),
            features: Vec::new(),
            images: Vec::new(),
            stock_by_store: Vec::new(),
        }
    }

    /// Use a caller-supplied identifier instead of a generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Set the stock count; `in_stock` follows whether any unit is left.
    pub fn with_stock_count(mut self, stock_count: i32) -> Self {
        self.stock_count = stock_count;
        self.in_stock = stock_count > 0;
        self
    }

    pub fn with_card_image(mut self, url: impl Into<String>) -> Self {
        self.card_image = Some(url.into());
        self
    }

    pub fn with_sports(mut self, sports: impl IntoIterator<Item = Sport>) -> Self {
        self.sports = sports.into_iter().collect();
        self
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = SkillLevel>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn with_features(mut self, features: Vec<ProductFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_images(mut self, images: Vec<ProductImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_stock_by_store(mut self, stock_by_store: Vec<ProductStoreStock>) -> Self {
        self.stock_by_store = stock_by_store;
        self
    }
}

/// Filter definition used to select products from the catalog.
///
/// Every field is optional and all supplied fields must match. Results keep
/// creation order and carry the sport and level tags of each product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Case-insensitive substring matched against sport tag codes.
    pub sport: Option<String>,
    /// Case-insensitive substring matched against level tag codes.
    pub level: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductListQuery {
    /// Construct a query that matches the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to products with a sport tag containing `term`. Blank terms
    /// are ignored.
    pub fn sport(mut self, term: impl AsRef<str>) -> Self {
        self.sport = non_blank(term.as_ref());
        self
    }

    /// Restrict to products with a level tag containing `term`. Blank terms
    /// are ignored.
    pub fn level(mut self, term: impl AsRef<str>) -> Self {
        self.level = non_blank(term.as_ref());
        self
    }

    pub fn min_price(mut self, price: Decimal) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Decimal) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Lower bound expressed in cents, rounded up so the bound stays inclusive.
    pub fn min_price_cents(&self) -> Option<i64> {
        self.min_price.map(|price| {
            price
                .checked_mul(Decimal::ONE_HUNDRED)
                .map_or_else(|| saturated(price), |cents| cents_saturating(cents.ceil()))
        })
    }

    /// Upper bound expressed in cents, rounded down so the bound stays inclusive.
    pub fn max_price_cents(&self) -> Option<i64> {
        self.max_price.map(|price| {
            price
                .checked_mul(Decimal::ONE_HUNDRED)
                .map_or_else(|| saturated(price), |cents| cents_saturating(cents.floor()))
        })
    }
}

fn non_blank(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn cents_saturating(value: Decimal) -> i64 {
    value.to_i64().unwrap_or_else(|| saturated(value))
}

fn saturated(value: Decimal) -> i64 {
    if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    }
}

/// Convert a price into integer cents, rounding to two fractional digits.
/// Returns `None` when the value does not fit.
pub fn price_to_cents(price: Decimal) -> Option<i64> {
    price
        .round_dp(PRICE_SCALE)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

/// Convert stored cents back into a decimal price.
pub fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}
