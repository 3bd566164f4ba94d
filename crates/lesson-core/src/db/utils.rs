//! Row decoding helpers shared by the query modules.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Row, types::Type};

/// Read a text column and parse it, reporting failures as conversion errors
/// on that column.
pub(super) fn parse_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text: String = row.get(index)?;
    text.parse::<T>()
        .map_err(|e| conversion_error(index, format!("Invalid value '{text}': {e}")))
}

/// Like [`parse_column`] for nullable columns.
pub(super) fn parse_optional_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(text) = row.get::<_, Option<String>>(index)? else {
        return Ok(None);
    };
    text.parse::<T>()
        .map(Some)
        .map_err(|e| conversion_error(index, format!("Invalid value '{text}': {e}")))
}

pub(super) fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}
