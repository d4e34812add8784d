//! Parser for the movie dataset.
//!
//! The dataset is a headed CSV file:
//! `movie_id,title,year,rating,genre,keywords,director,cast,description,poster_url`
//!
//! Text columns may be quoted (cast lists contain commas) and may be blank.
//! Required columns (`movie_id`, `title`, `year`, `rating`) must parse or the
//! whole file is rejected with the offending line.

use crate::error::{CatalogError, Result};
use crate::types::MovieRow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parse a movie CSV file into raw rows
pub fn parse_movies_csv(path: &Path) -> Result<Vec<MovieRow>> {
    let file = File::open(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_rows(file, &file_name)
}

/// Parse movie rows from any reader (used for in-memory fixtures)
pub fn parse_movies_reader<R: Read>(reader: R) -> Result<Vec<MovieRow>> {
    parse_rows(reader, "<reader>")
}

fn parse_rows<R: Read>(reader: R, file: &str) -> Result<Vec<MovieRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.deserialize::<MovieRow>().enumerate() {
        // Header is line 1, so the first record sits on line 2 unless the
        // reader can tell us better (quoted fields may span lines)
        let row = record.map_err(|e| CatalogError::ParseError {
            file: file.to_string(),
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2),
            reason: describe_csv_error(&e),
        })?;
        rows.push(row);
    }

    debug!("Parsed {} movie rows from {}", rows.len(), file);
    Ok(rows)
}

fn describe_csv_error(error: &csv::Error) -> String {
    match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => error.to_string(),
    }
}
