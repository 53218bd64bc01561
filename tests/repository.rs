use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use sport_catalog::db::DbPool;
use sport_catalog::domain::level::SkillLevel;
use sport_catalog::domain::password::PasswordHash;
use sport_catalog::domain::product::{NewProduct, ProductListQuery};
use sport_catalog::domain::product_feature::ProductFeature;
use sport_catalog::domain::product_image::ProductImage;
use sport_catalog::domain::product_stock::ProductStoreStock;
use sport_catalog::domain::sport::Sport;
use sport_catalog::domain::user::{NewUser, UpdateUser};
use sport_catalog::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, UserReader, UserWriter,
};
use sport_catalog::schema;

mod common;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

fn count_owned_rows(pool: &DbPool) -> i64 {
    let mut conn = pool.get().expect("connection");
    let sports: i64 = schema::product_sports::table
        .count()
        .get_result(&mut conn)
        .expect("count sports");
    let levels: i64 = schema::product_levels::table
        .count()
        .get_result(&mut conn)
        .expect("count levels");
    let features: i64 = schema::product_features::table
        .count()
        .get_result(&mut conn)
        .expect("count features");
    let images: i64 = schema::product_images::table
        .count()
        .get_result(&mut conn)
        .expect("count images");
    let stocks: i64 = schema::product_store_stocks::table
        .count()
        .get_result(&mut conn)
        .expect("count stocks");
    sports + levels + features + images + stocks
}

fn full_product(id: &str) -> NewProduct {
    NewProduct::new("Raquette badminton")
        .with_id(id)
        .with_price(dec("49.90"))
        .with_stock_count(5)
        .with_sports([Sport::Badminton])
        .with_levels([SkillLevel::Expert, SkillLevel::Average])
        .with_features(vec![
            ProductFeature::new(2, "Cordage"),
            ProductFeature::new(1, "Cadre carbone"),
        ])
        .with_images(vec![ProductImage::new(
            1,
            "https://cdn.example.com/raquette.webp",
            true,
        )])
        .with_stock_by_store(vec![ProductStoreStock::new("Decathlon Lille", 5)])
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&full_product("p-1"))
        .expect("create product");

    assert_eq!(created.id, "p-1");
    assert_eq!(created.price, dec("49.90"));
    assert_eq!(created.sports, vec![Sport::Badminton]);
    assert_eq!(created.levels, vec![SkillLevel::Average, SkillLevel::Expert]);
    assert_eq!(
        created.features,
        vec![
            ProductFeature::new(1, "Cadre carbone"),
            ProductFeature::new(2, "Cordage")
        ]
    );
    assert_eq!(created.images.len(), 1);
    assert_eq!(created.stock_by_store.len(), 1);

    let generated = repo
        .create_product(&NewProduct::new("Balle").with_price(dec("3")))
        .expect("create product with generated id");
    assert!(!generated.id.is_empty());
    assert!(generated.position > created.position);

    let fetched = repo
        .get_product_by_id("p-1")
        .expect("get product")
        .expect("product exists");
    assert_eq!(fetched, created);

    let all = repo
        .list_products(ProductListQuery::new())
        .expect("list products");
    let ids: Vec<_> = all.iter().map(|product| product.id.clone()).collect();
    assert_eq!(ids, vec!["p-1".to_string(), generated.id.clone()]);

    let err = repo
        .create_product(&NewProduct::new("Doublon").with_id("p-1"))
        .expect_err("duplicate id");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    assert!(repo.get_product_by_id("missing").expect("get").is_none());
}

#[test]
fn test_delete_product_cascades() {
    let test_db = common::TestDb::new("test_delete_product_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&full_product("p-1"))
        .expect("create product");
    assert!(count_owned_rows(&test_db.pool()) > 0);

    repo.delete_product("p-1").expect("delete product");

    assert_eq!(count_owned_rows(&test_db.pool()), 0);
    assert!(repo.get_product_by_id("p-1").expect("get").is_none());

    let err = repo
        .delete_product("p-1")
        .expect_err("second delete must fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_tags_reject_duplicates_and_unknown_products() {
    let test_db = common::TestDb::new("test_tags_reject_duplicates.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&NewProduct::new("Ballon").with_id("p-ball"))
        .expect("create product");

    let tag = repo
        .add_sport_tag("p-ball", Sport::Basketball)
        .expect("add sport tag");
    assert_eq!(tag.sport, Sport::Basketball);

    let err = repo
        .add_sport_tag("p-ball", Sport::Basketball)
        .expect_err("duplicate sport tag");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    repo.add_level_tag("p-ball", SkillLevel::Beginner)
        .expect("add level tag");
    let err = repo
        .add_level_tag("p-ball", SkillLevel::Beginner)
        .expect_err("duplicate level tag");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let err = repo
        .add_sport_tag("missing", Sport::Tennis)
        .expect_err("unknown product");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_sub_collections_upsert() {
    let test_db = common::TestDb::new("test_sub_collections_upsert.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&full_product("p-1"))
        .expect("create product");

    repo.set_feature("p-1", &ProductFeature::new(1, "Cadre aluminium"))
        .expect("replace feature");
    repo.set_feature("p-1", &ProductFeature::new(3, "Housse incluse"))
        .expect("insert feature");
    repo.set_image(
        "p-1",
        &ProductImage::new(1, "https://cdn.example.com/raquette-v2.webp", false),
    )
    .expect("replace image");
    repo.set_store_stock("p-1", &ProductStoreStock::new("Decathlon Lille", 0))
        .expect("replace stock");
    repo.set_store_stock("p-1", &ProductStoreStock::new("Decathlon Lyon", 2))
        .expect("insert stock");

    let product = repo
        .get_product_by_id("p-1")
        .expect("get product")
        .expect("product exists");

    assert_eq!(
        product.features,
        vec![
            ProductFeature::new(1, "Cadre aluminium"),
            ProductFeature::new(2, "Cordage"),
            ProductFeature::new(3, "Housse incluse"),
        ]
    );
    assert_eq!(
        product.images,
        vec![ProductImage::new(
            1,
            "https://cdn.example.com/raquette-v2.webp",
            false
        )]
    );
    assert_eq!(
        product.stock_by_store,
        vec![
            ProductStoreStock::new("Decathlon Lille", 0),
            ProductStoreStock::new("Decathlon Lyon", 2),
        ]
    );

    let err = repo
        .set_feature("missing", &ProductFeature::new(1, "Orphelin"))
        .expect_err("unknown product");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_list_products_filters() {
    let test_db = common::TestDb::new("test_list_products_filters.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(
        &NewProduct::new("Sac 100%")
            .with_id("p-sac")
            .with_price(dec("20"))
            .with_sports([Sport::Running])
            .with_levels([SkillLevel::Beginner]),
    )
    .expect("create product");
    repo.create_product(
        &NewProduct::new("Sans tag")
            .with_id("p-bare")
            .with_price(dec("20")),
    )
    .expect("create product");

    let running = repo
        .list_products(ProductListQuery::new().sport("run"))
        .expect("list");
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].id, "p-sac");
    assert_eq!(running[0].levels, vec![SkillLevel::Beginner]);

    let wildcard = repo
        .list_products(ProductListQuery::new().sport("%"))
        .expect("list");
    assert!(wildcard.is_empty());

    let by_price = repo
        .list_products(
            ProductListQuery::new()
                .min_price(dec("20"))
                .max_price(dec("20")),
        )
        .expect("list");
    assert_eq!(by_price.len(), 2);
}

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new("test_user_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_user(
            &NewUser::new("bob", PasswordHash::from_stored("$argon2id$stub"))
                .with_sport(Sport::Natation),
        )
        .expect("create user");
    assert_eq!(created.level, SkillLevel::Beginner);
    assert_eq!(created.sport, Some(Sport::Natation));

    let err = repo
        .create_user(&NewUser::new("bob", PasswordHash::from_stored("$argon2id$x")))
        .expect_err("duplicate username");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    repo.create_user(&NewUser::new("alice", PasswordHash::from_stored("$argon2id$y")))
        .expect("create second user");

    assert!(repo.get_user_by_username("Bob").expect("lookup").is_none());

    let updated = repo
        .update_user("bob", &UpdateUser::new().level(SkillLevel::Expert))
        .expect("update level");
    assert_eq!(updated.level, SkillLevel::Expert);
    assert_eq!(updated.sport, Some(Sport::Natation));
    assert_eq!(updated.username, "bob");

    let err = repo
        .update_user("bob", &UpdateUser::new().username("alice"))
        .expect_err("rename onto existing user");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let err = repo
        .update_user("ghost", &UpdateUser::new().level(SkillLevel::Expert))
        .expect_err("unknown user");
    assert!(matches!(err, RepositoryError::NotFound));

    let renamed = repo
        .update_user("bob", &UpdateUser::new().username("robert"))
        .expect("rename");
    assert_eq!(renamed.id, created.id);
    assert!(repo.get_user_by_username("bob").expect("lookup").is_none());
}
