//! Typed view over the cleaned movie/credit projection

use super::table::{Cell, Table};
use crate::errors::AppResult;
use serde_json::{Map, Value};

/// Columns of the cleaned table, in output order
pub const COMBINED_COLUMNS: [&str; 7] = [
    "movie_id", "title", "overview", "genres", "keywords", "cast", "crew",
];

/// One row of the cleaned table
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub movie_id: Cell,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

impl CombinedRecord {
    /// Read every row of a table carrying the combined columns
    pub fn from_table(table: &Table) -> AppResult<Vec<Self>> {
        let projected = table.select(&COMBINED_COLUMNS)?;
        Ok(projected
            .rows()
            .iter()
            .map(|row| Self {
                movie_id: row[0].clone(),
                title: row[1].as_text(),
                overview: row[2].as_text(),
                genres: row[3].as_text(),
                keywords: row[4].as_text(),
                cast: row[5].as_text(),
                crew: row[6].as_text(),
            })
            .collect())
    }

    pub fn genre_names(&self) -> Vec<String> {
        structured_names(self.genres.as_deref())
    }

    pub fn keyword_names(&self) -> Vec<String> {
        structured_names(self.keywords.as_deref())
    }

    pub fn cast_names(&self) -> Vec<String> {
        structured_names(self.cast.as_deref())
    }

    pub fn crew_names(&self) -> Vec<String> {
        structured_names(self.crew.as_deref())
    }

    /// JSON object for export. Structured columns are embedded as parsed
    /// JSON when they parse and kept as strings otherwise.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "movie_id".to_string(),
            serde_json::to_value(&self.movie_id).unwrap_or(Value::Null),
        );
        object.insert("title".to_string(), text_value(&self.title));
        object.insert("overview".to_string(), text_value(&self.overview));
        object.insert("genres".to_string(), structured_value(&self.genres));
        object.insert("keywords".to_string(), structured_value(&self.keywords));
        object.insert("cast".to_string(), structured_value(&self.cast));
        object.insert("crew".to_string(), structured_value(&self.crew));
        Value::Object(object)
    }
}

/// `name` values of a JSON list of objects; anything else yields no names
pub fn structured_names(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn text_value(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}

fn structured_value(value: &Option<String>) -> Value {
    match value {
        None => Value::Null,
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone())),
    }
}
