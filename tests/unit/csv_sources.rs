use movie_credits_loader::processor::parse_csv_table;
use movie_credits_loader::types::{Cell, ColumnType};

use crate::common::{credits_csv, movies_csv};

#[test]
fn test_movies_fixture_parses_with_all_columns() {
    let movies = parse_csv_table(&movies_csv()).expect("Failed to parse movies");

    assert_eq!(movies.row_count(), 4);
    assert_eq!(movies.columns().len(), 16);
    for name in ["movie_id", "title", "overview", "genres", "keywords"] {
        assert!(movies.column_index(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_movies_fixture_column_types() {
    let movies = parse_csv_table(&movies_csv()).expect("Failed to parse movies");
    let types = movies.infer_column_types();

    let type_of = |name: &str| types[movies.column_index(name).unwrap()];
    assert_eq!(type_of("movie_id"), ColumnType::Integer);
    assert_eq!(type_of("popularity"), ColumnType::Real);
    assert_eq!(type_of("title"), ColumnType::Text);
    assert_eq!(type_of("genres"), ColumnType::Text);
    assert_eq!(type_of("release_date"), ColumnType::Text);
}

#[test]
fn test_credits_fixture_keeps_json_lists_verbatim() {
    let credits = parse_csv_table(&credits_csv()).expect("Failed to parse credits");
    let crew = credits.column_index("crew").unwrap();

    assert_eq!(credits.row_count(), 4);
    assert_eq!(
        credits.rows()[2][crew],
        Cell::from(r#"[{"department": "Directing", "job": "Director", "name": "Sam Mendes"}]"#)
    );
}

#[test]
fn test_windows_line_endings() {
    let table = parse_csv_table("title,cast\r\nAvatar,[]\r\nSpectre,[]\r\n").unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[1][0], Cell::from("Spectre"));
}
