use crate::db::{DbConnection, DbPool};
use crate::domain::level::SkillLevel;
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::domain::product_feature::ProductFeature;
use crate::domain::product_image::ProductImage;
use crate::domain::product_stock::ProductStoreStock;
use crate::domain::product_tag::{ProductLevelTag, ProductSportTag};
use crate::domain::sport::Sport;
use crate::domain::user::{NewUser, UpdateUser, User};

pub mod errors;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the catalog.
pub trait ProductReader {
    /// Fetch a product with every owned collection materialized.
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    /// List products matching `query` in creation order, with sport and level
    /// tags populated.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over the catalog. Multi-row writes are transactional.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Delete a product and every row it owns.
    fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
    fn add_sport_tag(&self, product_id: &str, sport: Sport) -> RepositoryResult<ProductSportTag>;
    fn add_level_tag(
        &self,
        product_id: &str,
        level: SkillLevel,
    ) -> RepositoryResult<ProductLevelTag>;
    /// Insert or replace the feature at `feature.position`.
    fn set_feature(
        &self,
        product_id: &str,
        feature: &ProductFeature,
    ) -> RepositoryResult<ProductFeature>;
    /// Insert or replace the image at `image.position`.
    fn set_image(&self, product_id: &str, image: &ProductImage) -> RepositoryResult<ProductImage>;
    /// Insert or replace the stock held by `stock.store`.
    fn set_store_stock(
        &self,
        product_id: &str,
        stock: &ProductStoreStock,
    ) -> RepositoryResult<ProductStoreStock>;
}

/// Read-only operations over accounts.
pub trait UserReader {
    /// Exact, case-sensitive lookup by login name.
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations over accounts.
pub trait UserWriter {
    /// Insert a new account unless the username is taken, in which case
    /// `RepositoryError::Conflict` is returned and nothing is written.
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Apply a partial update to the account named `username`.
    fn update_user(&self, username: &str, updates: &UpdateUser) -> RepositoryResult<User>;
}
