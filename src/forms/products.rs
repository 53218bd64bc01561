use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidateUrl};

use crate::domain::level::SkillLevel;
use crate::domain::product::{NewProduct, PRICE_SCALE, price_to_cents};
use crate::domain::product_feature::ProductFeature;
use crate::domain::product_image::ProductImage;
use crate::domain::product_stock::ProductStoreStock;
use crate::domain::sport::Sport;
use crate::forms::{
    FormError, FormResult, InvalidFields, optional_inline, sanitize_inline_text,
    sanitize_multiline_text,
};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Maximum allowed length for a SKU, brand or category.
const SHORT_TEXT_MAX_LEN: u64 = 64;

/// Maximum allowed length for a feature line.
const FEATURE_MAX_LEN: u64 = 256;

/// Maximum allowed length for a store name.
const STORE_MAX_LEN: u64 = 128;

/// Image entry nested in the create payload; its position is its index.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductImageInput {
    pub url: String,
    #[serde(default)]
    pub is_card: bool,
}

/// Store stock entry nested in the create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreStockInput {
    pub store: String,
    pub stock: i32,
}

/// Payload accepted when creating a product.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddProductForm {
    /// Optional caller-chosen identifier.
    #[validate(length(min = 1, max = SHORT_TEXT_MAX_LEN))]
    pub id: Option<String>,
    #[validate(length(max = SHORT_TEXT_MAX_LEN))]
    pub sku: Option<String>,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = SHORT_TEXT_MAX_LEN))]
    pub category: Option<String>,
    #[validate(length(max = SHORT_TEXT_MAX_LEN))]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub rating: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub review_count: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub warranty_months: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub delivery_days: i32,
    /// Defaults to whether `stock_count` is positive.
    pub in_stock: Option<bool>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_count: i32,
    #[validate(url)]
    pub card_image: Option<String>,
    /// Sport codes, case-insensitive.
    #[serde(default)]
    pub sports: Vec<String>,
    /// Level codes, case-insensitive.
    #[serde(default)]
    pub levels: Vec<String>,
    /// Feature lines in display order.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImageInput>,
    #[serde(default)]
    pub stock_by_store: Vec<StoreStockInput>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    ///
    /// Every offending field is reported at once.
    pub fn into_new_product(self) -> FormResult<NewProduct> {
        let mut invalid = InvalidFields::from_validation(self.validate());

        let name = sanitize_inline_text(&self.name);
        invalid.check(!name.is_empty(), "name");

        invalid.check(
            self.price >= Decimal::ZERO && price_to_cents(self.price).is_some(),
            "price",
        );

        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let sports = parse_codes::<Sport>(&self.sports, "sports", &mut invalid);
        let levels = parse_codes::<SkillLevel>(&self.levels, "levels", &mut invalid);

        let mut features = Vec::with_capacity(self.features.len());
        for (index, raw) in self.features.iter().enumerate() {
            let text = sanitize_inline_text(raw);
            if text.is_empty() || text.len() as u64 > FEATURE_MAX_LEN {
                invalid.push("features");
                continue;
            }
            features.push(ProductFeature::new(position_for(index), text));
        }

        let mut images = Vec::with_capacity(self.images.len());
        for (index, image) in self.images.iter().enumerate() {
            let url = image.url.trim();
            if !url.validate_url() {
                invalid.push("images");
                continue;
            }
            images.push(ProductImage::new(position_for(index), url, image.is_card));
        }

        let mut stores_seen = HashSet::new();
        let mut stock_by_store = Vec::with_capacity(self.stock_by_store.len());
        for entry in &self.stock_by_store {
            let store = sanitize_inline_text(&entry.store);
            let valid = !store.is_empty()
                && store.len() as u64 <= STORE_MAX_LEN
                && entry.stock >= 0
                && stores_seen.insert(store.clone());
            if !valid {
                invalid.push("stock_by_store");
                continue;
            }
            stock_by_store.push(ProductStoreStock::new(store, entry.stock));
        }

        invalid.finish()?;

        let card_image = self
            .card_image
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| {
                images
                    .iter()
                    .find(|image| image.is_card)
                    .map(|image| image.url.clone())
            });

        let mut new_product = NewProduct::new(name)
            .with_price(self.price.round_dp(PRICE_SCALE))
            .with_stock_count(self.stock_count)
            .with_sports(sports)
            .with_levels(levels)
            .with_features(features)
            .with_images(images)
            .with_stock_by_store(stock_by_store);

        new_product.rating = self.rating;
        new_product.review_count = self.review_count;
        new_product.warranty_months = self.warranty_months;
        new_product.delivery_days = self.delivery_days;
        new_product.card_image = card_image;

        if let Some(in_stock) = self.in_stock {
            new_product.in_stock = in_stock;
        }

        if let Some(id) = id {
            new_product = new_product.with_id(id);
        }

        if let Some(sku) = self
            .sku
            .as_deref()
            .map(sanitize_sku)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_sku(sku);
        }

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        if let Some(category) = optional_inline(self.category.as_deref()) {
            new_product = new_product.with_category(category.to_uppercase());
        }

        if let Some(brand) = optional_inline(self.brand.as_deref()) {
            new_product = new_product.with_brand(brand);
        }

        Ok(new_product)
    }
}

/// Payload used to tag a product with a sport.
#[derive(Debug, Deserialize)]
pub struct AddSportTagForm {
    pub sport: String,
}

impl AddSportTagForm {
    pub fn into_sport(self) -> FormResult<Sport> {
        self.sport
            .parse::<Sport>()
            .map_err(|_| FormError::InvalidFields(vec!["sport".to_string()]))
    }
}

/// Payload used to tag a product with a skill level.
#[derive(Debug, Deserialize)]
pub struct AddLevelTagForm {
    pub level: String,
}

impl AddLevelTagForm {
    pub fn into_level(self) -> FormResult<SkillLevel> {
        self.level
            .parse::<SkillLevel>()
            .map_err(|_| FormError::InvalidFields(vec!["level".to_string()]))
    }
}

/// Payload used to insert or replace the feature at a position.
#[derive(Debug, Deserialize, Validate)]
pub struct SetFeatureForm {
    #[validate(length(min = 1, max = FEATURE_MAX_LEN))]
    pub text: String,
}

impl SetFeatureForm {
    pub fn into_feature(self, position: i32) -> FormResult<ProductFeature> {
        let mut invalid = InvalidFields::from_validation(self.validate());
        invalid.check(position >= 0, "position");

        let text = sanitize_inline_text(&self.text);
        invalid.check(!text.is_empty(), "text");
        invalid.finish()?;

        Ok(ProductFeature::new(position, text))
    }
}

/// Payload used to insert or replace the image at a position.
#[derive(Debug, Deserialize, Validate)]
pub struct SetImageForm {
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub is_card: bool,
}

impl SetImageForm {
    pub fn into_image(self, position: i32) -> FormResult<ProductImage> {
        let mut invalid = InvalidFields::from_validation(self.validate());
        invalid.check(position >= 0, "position");
        invalid.finish()?;

        Ok(ProductImage::new(position, self.url.trim(), self.is_card))
    }
}

/// Payload used to record the stock held by a store.
#[derive(Debug, Deserialize, Validate)]
pub struct SetStoreStockForm {
    #[validate(length(min = 1, max = STORE_MAX_LEN))]
    pub store: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl SetStoreStockForm {
    pub fn into_store_stock(self) -> FormResult<ProductStoreStock> {
        let mut invalid = InvalidFields::from_validation(self.validate());

        let store = sanitize_inline_text(&self.store);
        invalid.check(!store.is_empty(), "store");
        invalid.finish()?;

        Ok(ProductStoreStock::new(store, self.stock))
    }
}

/// Parse codes into a sorted, de-duplicated list, flagging `field` on any
/// unknown code.
fn parse_codes<T>(raw: &[String], field: &str, invalid: &mut InvalidFields) -> Vec<T>
where
    T: std::str::FromStr + Ord,
{
    let mut parsed = BTreeSet::new();
    for code in raw {
        match code.parse::<T>() {
            Ok(value) => {
                parsed.insert(value);
            }
            Err(_) => invalid.push(field),
        }
    }
    parsed.into_iter().collect()
}

fn position_for(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}

fn sanitize_sku(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn base_form() -> AddProductForm {
        AddProductForm {
            name: "Raquette badminton power strike 78".to_string(),
            price: Decimal::from_str("69.99").expect("valid decimal"),
            ..AddProductForm::default()
        }
    }

    fn fields(err: FormError) -> Vec<String> {
        err.fields().to_vec()
    }

    #[test]
    fn add_product_form_converts_with_defaults() {
        let product = base_form()
            .into_new_product()
            .expect("expected conversion to succeed");

        assert_eq!(product.name, "Raquette badminton power strike 78");
        assert_eq!(product.price.to_string(), "69.99");
        assert_eq!(product.stock_count, 0);
        assert!(!product.in_stock);
        assert!(product.id.is_none());
        assert!(product.card_image.is_none());
    }

    #[test]
    fn add_product_form_parses_codes_and_collections() {
        let form = AddProductForm {
            id: Some(" p-bad-002 ".to_string()),
            sports: vec!["badminton".to_string(), "BADMINTON".to_string()],
            levels: vec!["EXPERT".to_string(), "average".to_string()],
            features: vec!["Robustesse".to_string(), "  Performance  ".to_string()],
            images: vec![
                ProductImageInput {
                    url: "https://cdn.example.com/p-bad-002/1.webp".to_string(),
                    is_card: false,
                },
                ProductImageInput {
                    url: "https://cdn.example.com/p-bad-002/2.webp".to_string(),
                    is_card: true,
                },
            ],
            stock_by_store: vec![StoreStockInput {
                store: "Decathlon Lille".to_string(),
                stock: 3,
            }],
            stock_count: 3,
            category: Some("materiel".to_string()),
            ..base_form()
        };

        let product = form.into_new_product().expect("expected conversion");

        assert_eq!(product.id.as_deref(), Some("p-bad-002"));
        assert_eq!(product.sports, vec![Sport::Badminton]);
        assert_eq!(product.levels, vec![SkillLevel::Average, SkillLevel::Expert]);
        assert_eq!(
            product.features,
            vec![
                ProductFeature::new(1, "Robustesse"),
                ProductFeature::new(2, "Performance")
            ]
        );
        assert_eq!(product.images.len(), 2);
        assert_eq!(
            product.card_image.as_deref(),
            Some("https://cdn.example.com/p-bad-002/2.webp")
        );
        assert_eq!(product.category.as_deref(), Some("MATERIEL"));
        assert!(product.in_stock);
    }

    #[test]
    fn add_product_form_rejects_negative_price() {
        let form = AddProductForm {
            price: Decimal::from(-10),
            ..base_form()
        };

        let err = form.into_new_product().expect_err("negative price");

        assert_eq!(fields(err), vec!["price".to_string()]);
    }

    #[test]
    fn add_product_form_accepts_large_representable_price() {
        let form = AddProductForm {
            price: Decimal::from(2_500_000),
            ..base_form()
        };

        let product = form.into_new_product().expect("large price");

        assert_eq!(product.price, Decimal::from(2_500_000));
    }

    #[test]
    fn add_product_form_rejects_price_without_cents_representation() {
        let form = AddProductForm {
            price: Decimal::MAX,
            ..base_form()
        };

        let err = form.into_new_product().expect_err("oversized price");

        assert_eq!(fields(err), vec!["price".to_string()]);
    }

    #[test]
    fn add_product_form_lists_every_offending_field() {
        let form = AddProductForm {
            name: "   ".to_string(),
            price: Decimal::from(-1),
            stock_count: -4,
            card_image: Some("not a url".to_string()),
            sports: vec!["CURLING".to_string()],
            ..AddProductForm::default()
        };

        let err = form.into_new_product().expect_err("invalid payload");

        assert_eq!(
            fields(err),
            vec![
                "card_image".to_string(),
                "name".to_string(),
                "price".to_string(),
                "sports".to_string(),
                "stock_count".to_string(),
            ]
        );
    }

    #[test]
    fn add_product_form_rejects_duplicate_store() {
        let form = AddProductForm {
            stock_by_store: vec![
                StoreStockInput {
                    store: "Decathlon Lille".to_string(),
                    stock: 1,
                },
                StoreStockInput {
                    store: "Decathlon  Lille".to_string(),
                    stock: 2,
                },
            ],
            ..base_form()
        };

        let err = form.into_new_product().expect_err("duplicate store");

        assert_eq!(fields(err), vec!["stock_by_store".to_string()]);
    }

    #[test]
    fn sport_tag_form_rejects_unknown_code() {
        let form = AddSportTagForm {
            sport: "CURLING".to_string(),
        };

        let err = form.into_sport().expect_err("unknown sport");

        assert_eq!(fields(err), vec!["sport".to_string()]);
    }

    #[test]
    fn level_tag_form_parses_code() {
        let form = AddLevelTagForm {
            level: "expert".to_string(),
        };

        assert_eq!(form.into_level(), Ok(SkillLevel::Expert));
    }

    #[test]
    fn set_image_form_rejects_malformed_url() {
        let form = SetImageForm {
            url: "htp//broken".to_string(),
            is_card: true,
        };

        let err = form.into_image(1).expect_err("malformed url");

        assert_eq!(fields(err), vec!["url".to_string()]);
    }

    #[test]
    fn set_feature_form_sanitizes_text() {
        let form = SetFeatureForm {
            text: "  Maintien \t lateral ".to_string(),
        };

        let feature = form.into_feature(2).expect("valid feature");

        assert_eq!(feature, ProductFeature::new(2, "Maintien lateral"));
    }

    #[test]
    fn set_store_stock_form_rejects_negative_stock() {
        let form = SetStoreStockForm {
            store: "Decathlon Lyon Part-Dieu".to_string(),
            stock: -1,
        };

        let err = form.into_store_stock().expect_err("negative stock");

        assert_eq!(fields(err), vec!["stock".to_string()]);
    }
}
