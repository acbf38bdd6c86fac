use datawright::store::sqlite::SqliteReader;
use datawright::store::{Scalar, StoreReader};

fn fixture() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE t (kind TEXT, n INTEGER, x REAL);
         INSERT INTO t VALUES ('a', 2, 1.5), ('a', 3, 2.0), ('b', 7, 0.5);",
    )
    .unwrap();
    (dir, path)
}

#[tokio::test]
async fn integer_aggregate() {
    let (_dir, db) = fixture();
    let value = SqliteReader::new()
        .scalar(&db, "SELECT SUM(n) FROM t WHERE kind = ?1", &["a".to_string()])
        .await
        .unwrap();
    assert_eq!(value, Scalar::Integer(5));
}

#[tokio::test]
async fn real_aggregate() {
    let (_dir, db) = fixture();
    let value = SqliteReader::new()
        .scalar(&db, "SELECT SUM(n * x) FROM t WHERE kind = ?1", &["a".to_string()])
        .await
        .unwrap();
    assert_eq!(value, Scalar::Real(9.0));
    assert_eq!(value.to_string(), "9.0");
}

#[tokio::test]
async fn no_matching_rows_is_null() {
    let (_dir, db) = fixture();
    let value = SqliteReader::new()
        .scalar(&db, "SELECT SUM(n) FROM t WHERE kind = ?1", &["zzz".to_string()])
        .await
        .unwrap();
    assert_eq!(value, Scalar::Null);
}

#[tokio::test]
async fn empty_result_set_is_null() {
    let (_dir, db) = fixture();
    let value = SqliteReader::new()
        .scalar(&db, "SELECT n FROM t WHERE 0", &[])
        .await
        .unwrap();
    assert_eq!(value, Scalar::Null);
}

#[tokio::test]
async fn text_value() {
    let (_dir, db) = fixture();
    let value = SqliteReader::new()
        .scalar(&db, "SELECT kind FROM t WHERE n = 7", &[])
        .await
        .unwrap();
    assert_eq!(value, Scalar::Text("b".to_string()));
}

#[tokio::test]
async fn opens_read_only() {
    let (_dir, db) = fixture();
    let result = SqliteReader::new()
        .scalar(&db, "DELETE FROM t RETURNING n", &[])
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn missing_database_is_error_and_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("absent.db");
    let result = SqliteReader::new().scalar(&db, "SELECT 1", &[]).await;
    assert!(result.is_err());
    assert!(!db.exists());
}
