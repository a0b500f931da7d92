//! Untyped row decoding.
//!
//! The `Any` driver only knows a handful of primitive types, and engines
//! disagree on integer widths, so each value is tried against a short list.

use doorbridge_app::ports::{SqlRow, SqlValue};
use sqlx::any::AnyRow;
use sqlx::{Column, Row, ValueRef};

pub(crate) fn decode_row(row: &AnyRow) -> Result<SqlRow, sqlx::Error> {
    let columns = row
        .columns()
        .iter()
        .map(|column| {
            let value = decode_value(row, column.ordinal())?;
            Ok((column.name().to_string(), value))
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(SqlRow::new(columns))
}

fn decode_value(row: &AnyRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(SqlValue::Null);
    }
    if let Ok(text) = row.try_get::<String, _>(index) {
        return Ok(SqlValue::Text(text));
    }
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return Ok(SqlValue::Int(value));
    }
    if let Ok(value) = row.try_get::<i32, _>(index) {
        return Ok(SqlValue::Int(value.into()));
    }
    if let Ok(value) = row.try_get::<i16, _>(index) {
        return Ok(SqlValue::Int(value.into()));
    }
    row.try_get::<f64, _>(index)
        .map(|value| SqlValue::Text(value.to_string()))
}
