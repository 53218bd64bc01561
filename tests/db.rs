use diesel::prelude::*;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct PragmaValue {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_creates_and_removes_db_files() {
    let path = {
        let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(test_db.path().exists());
        test_db.path().to_path_buf()
    };

    assert!(!path.exists());
    assert!(!path.with_extension("db-wal").exists());
}

#[test]
fn test_pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_pooled_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("connection");

    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaValue>(&mut conn)
        .expect("read pragma");
    assert_eq!(pragma.foreign_keys, 1);

    let orphan = diesel::sql_query(
        "INSERT INTO product_sports (product_id, sport) VALUES ('missing', 'TENNIS')",
    )
    .execute(&mut conn);
    assert!(orphan.is_err(), "orphan tag must be rejected");
}
