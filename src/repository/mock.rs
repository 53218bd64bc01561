use mockall::mock;

use super::{ProductReader, ProductWriter, RepositoryResult, UserReader, UserWriter};
use crate::domain::{
    level::SkillLevel,
    product::{NewProduct, Product, ProductListQuery},
    product_feature::ProductFeature,
    product_image::ProductImage,
    product_stock::ProductStoreStock,
    product_tag::{ProductLevelTag, ProductSportTag},
    sport::Sport,
    user::{NewUser, UpdateUser, User},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
        fn add_sport_tag(&self, product_id: &str, sport: Sport) -> RepositoryResult<ProductSportTag>;
        fn add_level_tag(&self, product_id: &str, level: SkillLevel) -> RepositoryResult<ProductLevelTag>;
        fn set_feature(&self, product_id: &str, feature: &ProductFeature) -> RepositoryResult<ProductFeature>;
        fn set_image(&self, product_id: &str, image: &ProductImage) -> RepositoryResult<ProductImage>;
        fn set_store_stock(&self, product_id: &str, stock: &ProductStoreStock) -> RepositoryResult<ProductStoreStock>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, username: &str, updates: &UpdateUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub UserStore {}

    impl UserReader for UserStore {
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for UserStore {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, username: &str, updates: &UpdateUser) -> RepositoryResult<User>;
    }
}
