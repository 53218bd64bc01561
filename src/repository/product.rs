use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::{
    domain::level::SkillLevel,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        price_to_cents,
    },
    domain::product_feature::ProductFeature as DomainProductFeature,
    domain::product_image::ProductImage as DomainProductImage,
    domain::product_stock::ProductStoreStock as DomainProductStoreStock,
    domain::product_tag::{ProductLevelTag, ProductSportTag},
    domain::sport::Sport,
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    models::product_feature::{NewProductFeature, ProductFeature as DbProductFeature},
    models::product_image::{NewProductImage, ProductImage as DbProductImage},
    models::product_stock::{NewProductStoreStock, ProductStoreStock as DbProductStoreStock},
    models::product_tag::{
        NewProductLevel, NewProductSport, ProductLevel as DbProductLevel,
        ProductSport as DbProductSport,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        load_product(&mut conn, id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{product_levels, product_sports, products};

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<Sqlite>();

        if let Some(term) = query.sport.as_ref() {
            let tagged = product_sports::table
                .filter(product_sports::sport.like(contains_pattern(term)).escape('\\'))
                .select(product_sports::product_id);
            items = items.filter(products::id.eq_any(tagged));
        }

        if let Some(term) = query.level.as_ref() {
            let tagged = product_levels::table
                .filter(product_levels::level.like(contains_pattern(term)).escape('\\'))
                .select(product_levels::product_id);
            items = items.filter(products::id.eq_any(tagged));
        }

        if let Some(min_cents) = query.min_price_cents() {
            items = items.filter(products::price_cents.ge(min_cents));
        }

        if let Some(max_cents) = query.max_price_cents() {
            items = items.filter(products::price_cents.le(max_cents));
        }

        let db_products = items
            .order(products::position.asc())
            .load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        let mut domain_products: Vec<DomainProduct> =
            db_products.into_iter().map(Into::into).collect();
        attach_tags(&mut conn, &mut domain_products)?;

        Ok(domain_products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{
            product_features, product_images, product_levels, product_sports,
            product_store_stocks, products,
        };

        let price_cents =
            price_to_cents(new_product.price).ok_or(RepositoryError::InvalidValue("price"))?;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let id = new_product
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            let existing = products::table
                .filter(products::id.eq(&id))
                .count()
                .get_result::<i64>(conn)?;
            if existing > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "product `{id}` already exists"
                )));
            }

            let position = products::table
                .select(diesel::dsl::max(products::position))
                .first::<Option<i64>>(conn)?
                .unwrap_or(0)
                + 1;

            let db_new = DbNewProduct::from_domain(&id, position, price_cents, new_product);
            diesel::insert_into(products::table)
                .values(&db_new)
                .execute(conn)?;

            if !new_product.sports.is_empty() {
                let rows: Vec<NewProductSport> = new_product
                    .sports
                    .iter()
                    .map(|sport| NewProductSport {
                        product_id: &id,
                        sport: sport.code(),
                    })
                    .collect();
                diesel::insert_into(product_sports::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !new_product.levels.is_empty() {
                let rows: Vec<NewProductLevel> = new_product
                    .levels
                    .iter()
                    .map(|level| NewProductLevel {
                        product_id: &id,
                        level: level.code(),
                    })
                    .collect();
                diesel::insert_into(product_levels::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !new_product.features.is_empty() {
                let rows: Vec<NewProductFeature> = new_product
                    .features
                    .iter()
                    .map(|feature| NewProductFeature::from_domain(&id, feature))
                    .collect();
                diesel::insert_into(product_features::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !new_product.images.is_empty() {
                let rows: Vec<NewProductImage> = new_product
                    .images
                    .iter()
                    .map(|image| NewProductImage::from_domain(&id, image))
                    .collect();
                diesel::insert_into(product_images::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !new_product.stock_by_store.is_empty() {
                let rows: Vec<NewProductStoreStock> = new_product
                    .stock_by_store
                    .iter()
                    .map(|stock| NewProductStoreStock::from_domain(&id, stock))
                    .collect();
                diesel::insert_into(product_store_stocks::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            load_product(conn, &id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, product_id: &str) -> RepositoryResult<()> {
        use crate::schema::{
            product_features, product_images, product_levels, product_sports,
            product_store_stocks, products,
        };

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(product_sports::table.filter(product_sports::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(product_levels::table.filter(product_levels::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                product_features::table.filter(product_features::product_id.eq(product_id)),
            )
            .execute(conn)?;
            diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                product_store_stocks::table
                    .filter(product_store_stocks::product_id.eq(product_id)),
            )
            .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn add_sport_tag(&self, product_id: &str, sport: Sport) -> RepositoryResult<ProductSportTag> {
        use crate::schema::product_sports;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<ProductSportTag, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            let existing = product_sports::table
                .filter(product_sports::product_id.eq(product_id))
                .filter(product_sports::sport.eq(sport.code()))
                .count()
                .get_result::<i64>(conn)?;
            if existing > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "product `{product_id}` is already tagged {sport}"
                )));
            }

            diesel::insert_into(product_sports::table)
                .values(&NewProductSport {
                    product_id,
                    sport: sport.code(),
                })
                .execute(conn)?;

            Ok(ProductSportTag {
                product_id: product_id.to_string(),
                sport,
            })
        })
    }

    fn add_level_tag(
        &self,
        product_id: &str,
        level: SkillLevel,
    ) -> RepositoryResult<ProductLevelTag> {
        use crate::schema::product_levels;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<ProductLevelTag, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            let existing = product_levels::table
                .filter(product_levels::product_id.eq(product_id))
                .filter(product_levels::level.eq(level.code()))
                .count()
                .get_result::<i64>(conn)?;
            if existing > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "product `{product_id}` is already tagged {level}"
                )));
            }

            diesel::insert_into(product_levels::table)
                .values(&NewProductLevel {
                    product_id,
                    level: level.code(),
                })
                .execute(conn)?;

            Ok(ProductLevelTag {
                product_id: product_id.to_string(),
                level,
            })
        })
    }

    fn set_feature(
        &self,
        product_id: &str,
        feature: &DomainProductFeature,
    ) -> RepositoryResult<DomainProductFeature> {
        use crate::schema::product_features;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProductFeature, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            diesel::insert_into(product_features::table)
                .values(&NewProductFeature::from_domain(product_id, feature))
                .on_conflict((product_features::product_id, product_features::position))
                .do_update()
                .set(product_features::content.eq(&feature.text))
                .execute(conn)?;

            Ok(feature.clone())
        })
    }

    fn set_image(
        &self,
        product_id: &str,
        image: &DomainProductImage,
    ) -> RepositoryResult<DomainProductImage> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProductImage, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            diesel::insert_into(product_images::table)
                .values(&NewProductImage::from_domain(product_id, image))
                .on_conflict((product_images::product_id, product_images::position))
                .do_update()
                .set((
                    product_images::url.eq(&image.url),
                    product_images::is_card.eq(image.is_card),
                ))
                .execute(conn)?;

            Ok(image.clone())
        })
    }

    fn set_store_stock(
        &self,
        product_id: &str,
        stock: &DomainProductStoreStock,
    ) -> RepositoryResult<DomainProductStoreStock> {
        use crate::schema::product_store_stocks;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainProductStoreStock, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            diesel::insert_into(product_store_stocks::table)
                .values(&NewProductStoreStock::from_domain(product_id, stock))
                .on_conflict((
                    product_store_stocks::product_id,
                    product_store_stocks::store,
                ))
                .do_update()
                .set(product_store_stocks::stock.eq(stock.stock))
                .execute(conn)?;

            Ok(stock.clone())
        })
    }
}

/// Build a `LIKE` pattern matching `term` anywhere, with wildcards in the
/// term itself escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn ensure_product_exists(conn: &mut SqliteConnection, product_id: &str) -> RepositoryResult<()> {
    use crate::schema::products;

    let found = products::table
        .filter(products::id.eq(product_id))
        .count()
        .get_result::<i64>(conn)?;

    if found == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}

fn load_product(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> RepositoryResult<Option<DomainProduct>> {
    use crate::schema::{product_features, product_images, product_store_stocks, products};

    let product = products::table
        .filter(products::id.eq(product_id))
        .first::<DbProduct>(conn)
        .optional()?;

    let Some(db_product) = product else {
        return Ok(None);
    };

    let mut domain: DomainProduct = db_product.into();
    attach_tags(conn, std::slice::from_mut(&mut domain))?;

    domain.features = product_features::table
        .filter(product_features::product_id.eq(product_id))
        .order(product_features::position.asc())
        .load::<DbProductFeature>(conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    domain.images = product_images::table
        .filter(product_images::product_id.eq(product_id))
        .order(product_images::position.asc())
        .load::<DbProductImage>(conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    domain.stock_by_store = product_store_stocks::table
        .filter(product_store_stocks::product_id.eq(product_id))
        .order(product_store_stocks::id.asc())
        .load::<DbProductStoreStock>(conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Some(domain))
}

fn attach_tags(
    conn: &mut SqliteConnection,
    products: &mut [DomainProduct],
) -> RepositoryResult<()> {
    let product_ids: Vec<String> = products.iter().map(|product| product.id.clone()).collect();
    let mut sports = load_sports_for_products(conn, &product_ids)?;
    let mut levels = load_levels_for_products(conn, &product_ids)?;

    for product in products.iter_mut() {
        product.sports = sports.remove(&product.id).unwrap_or_default();
        product.levels = levels.remove(&product.id).unwrap_or_default();
    }

    Ok(())
}

fn load_sports_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[String],
) -> RepositoryResult<HashMap<String, Vec<Sport>>> {
    use crate::schema::product_sports;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_sports::table
        .filter(product_sports::product_id.eq_any(product_ids))
        .order(product_sports::sport.asc())
        .load::<DbProductSport>(conn)?;

    let mut map: HashMap<String, Vec<Sport>> = HashMap::new();
    for row in rows {
        match row.sport.parse::<Sport>() {
            Ok(sport) => map.entry(row.product_id).or_default().push(sport),
            Err(err) => log::warn!("Skipping tag on product {}: {err}", row.product_id),
        }
    }

    Ok(map)
}

fn load_levels_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[String],
) -> RepositoryResult<HashMap<String, Vec<SkillLevel>>> {
    use crate::schema::product_levels;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_levels::table
        .filter(product_levels::product_id.eq_any(product_ids))
        .order(product_levels::level.asc())
        .load::<DbProductLevel>(conn)?;

    let mut map: HashMap<String, Vec<SkillLevel>> = HashMap::new();
    for row in rows {
        match row.level.parse::<SkillLevel>() {
            Ok(level) => map.entry(row.product_id).or_default().push(level),
            Err(err) => log::warn!("Skipping tag on product {}: {err}", row.product_id),
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("BAD"), "%BAD%");
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
