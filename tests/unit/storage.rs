use movie_credits_loader::database::{Database, QueryHelper, CREDITS_TABLE, MOVIES_TABLE};
use movie_credits_loader::processor::{parse_csv_table, store_and_join};
use movie_credits_loader::types::{CombinedRecord, COMBINED_COLUMNS};

use crate::common::{credits_csv, movies_csv, TestWorkspace};

#[test]
fn test_store_and_join_fixtures() {
    let workspace = TestWorkspace::new();
    let movies = parse_csv_table(&movies_csv()).unwrap();
    let credits = parse_csv_table(&credits_csv()).unwrap();

    let (combined, diagnostics) =
        store_and_join(&workspace.database_path(), &movies, &credits).unwrap();

    assert_eq!(combined.columns(), &COMBINED_COLUMNS);
    assert_eq!(combined.row_count(), 4);
    assert!(diagnostics.is_clean());

    let records = CombinedRecord::from_table(&combined).unwrap();
    let spectre = records
        .iter()
        .find(|r| r.title.as_deref() == Some("Spectre"))
        .unwrap();
    assert_eq!(spectre.keyword_names(), vec!["spy"]);
    assert_eq!(spectre.cast_names(), vec!["Daniel Craig"]);
}

#[test]
fn test_existing_file_is_overwritten() {
    let workspace = TestWorkspace::new();
    let db_path = workspace.database_path();

    {
        let db = Database::open(&db_path).unwrap();
        db.connection()
            .execute_batch(
                "CREATE TABLE movies (stale TEXT);
                 INSERT INTO movies VALUES ('left over');
                 CREATE TABLE credits (stale TEXT);",
            )
            .unwrap();
        db.close().unwrap();
    }

    let movies = parse_csv_table(&movies_csv()).unwrap();
    let credits = parse_csv_table(&credits_csv()).unwrap();
    store_and_join(&db_path, &movies, &credits).unwrap();

    let db = Database::open(&db_path).unwrap();
    assert_eq!(db.table_row_count(MOVIES_TABLE).unwrap(), 4);
    assert_eq!(db.table_row_count(CREDITS_TABLE).unwrap(), 4);
    let stale_columns = db
        .connection()
        .query_count("SELECT COUNT(*) FROM pragma_table_info('movies') WHERE name = 'stale'")
        .unwrap();
    assert_eq!(stale_columns, 0);
}
