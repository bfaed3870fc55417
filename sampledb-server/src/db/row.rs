//! Result rows as JSON objects
//!
//! Tables are read with `SELECT *`, so columns are decoded by their reported
//! type rather than through typed structs. Column order is preserved.

use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::error::DbError;

/// One result row: column name to value, in column order
pub type Row = Map<String, Value>;

/// How a column is rendered in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Float,
    Double,
    /// Exact numerics, rendered as their text
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Time,
    Json,
    Binary,
    Text,
}

impl ColumnKind {
    pub(crate) fn from_type_name(name: &str) -> Self {
        let unsigned = name.ends_with("UNSIGNED");
        let base = name.split_whitespace().next().unwrap_or_default();

        match base {
            "BOOLEAN" => Self::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" if unsigned => {
                Self::Unsigned
            }
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => Self::Signed,
            "BIT" => Self::Unsigned,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DECIMAL" | "NUMERIC" => Self::Decimal,
            "DATE" => Self::Date,
            "DATETIME" => Self::DateTime,
            "TIMESTAMP" => Self::Timestamp,
            "TIME" => Self::Time,
            "JSON" => Self::Json,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB"
            | "GEOMETRY" => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Convert a driver row into a JSON object.
pub fn to_json(row: &MySqlRow) -> Result<Row, DbError> {
    let mut object = Row::new();

    for column in row.columns() {
        let kind = ColumnKind::from_type_name(column.type_info().name());
        let value = decode(row, column.ordinal(), kind).map_err(|source| DbError::Decode {
            column: column.name().to_owned(),
            source,
        })?;
        object.insert(column.name().to_owned(), value);
    }

    Ok(object)
}

fn decode(row: &MySqlRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match kind {
        ColumnKind::Bool => Value::Bool(row.try_get_unchecked::<bool, _>(index)?),
        ColumnKind::Signed => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        ColumnKind::Unsigned => Value::from(row.try_get_unchecked::<u64, _>(index)?),
        ColumnKind::Float => float(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        ColumnKind::Double => float(row.try_get_unchecked::<f64, _>(index)?),
        ColumnKind::Decimal | ColumnKind::Text => {
            Value::String(row.try_get_unchecked::<String, _>(index)?)
        }
        ColumnKind::Date => {
            Value::String(row.try_get::<NaiveDate, _>(index)?.format("%Y-%m-%d").to_string())
        }
        ColumnKind::DateTime => Value::String(
            row.try_get::<NaiveDateTime, _>(index)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        ColumnKind::Timestamp => {
            Value::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339())
        }
        ColumnKind::Time => {
            Value::String(row.try_get::<NaiveTime, _>(index)?.format("%H:%M:%S%.f").to_string())
        }
        ColumnKind::Json => {
            let text = row.try_get_unchecked::<String, _>(index)?;
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        ColumnKind::Binary => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
    };

    Ok(value)
}

// NaN and infinities have no JSON form
fn float(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}
