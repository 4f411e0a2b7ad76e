//! Campaign records: the persisted row mapper, the wire shape, and the strict conversion between them.

use crate::error::AppError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use utoipa::ToSchema;

/// Table holding campaign rows.
pub const TABLE: &str = "campaigns";

/// Columns read for every record, in wire order.
pub const COLUMNS: &[&str] = &["id", "name", "status", "clicks", "cost", "impressions"];

/// A campaign as sent over HTTP. All six fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    /// Free-form state label, e.g. "active" or "paused".
    pub status: String,
    pub clicks: i64,
    pub cost: f64,
    pub impressions: i64,
}

/// A row as read from storage, decoded column by column into JSON values.
/// Nothing about its shape is trusted until it passes [`to_wire`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignRecord(Map<String, Value>);

impl CampaignRecord {
    pub fn from_row(row: &PgRow) -> Result<Self, AppError> {
        use sqlx::{Column, Row};
        let mut map = Map::new();
        for col in row.columns() {
            map.insert(col.name().to_string(), cell_to_value(row, col)?);
        }
        Ok(Self(map))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for CampaignRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn cell_to_value(row: &PgRow, col: &sqlx::postgres::PgColumn) -> Result<Value, AppError> {
    use sqlx::{Column, Row, TypeInfo, ValueRef};
    let name = col.name();
    let is_null = row.try_get_raw(col.ordinal()).map(|v| v.is_null()).unwrap_or(false);
    if is_null {
        return Ok(Value::Null);
    }
    if let Ok(n) = row.try_get::<i16, _>(name) {
        return Ok(Value::Number(n.into()));
    }
    if let Ok(n) = row.try_get::<i32, _>(name) {
        return Ok(Value::Number(n.into()));
    }
    if let Ok(n) = row.try_get::<i64, _>(name) {
        return Ok(Value::Number(n.into()));
    }
    if let Ok(n) = row.try_get::<f32, _>(name) {
        return float_value(name, n as f64);
    }
    if let Ok(n) = row.try_get::<f64, _>(name) {
        return float_value(name, n);
    }
    if let Ok(d) = row.try_get::<Decimal, _>(name) {
        return decimal_value(name, d);
    }
    if let Ok(s) = row.try_get::<String, _>(name) {
        return Ok(Value::String(s));
    }
    Err(AppError::SchemaValidation(format!(
        "column {} has unsupported type {}",
        name,
        col.type_info().name()
    )))
}

fn float_value(column: &str, n: f64) -> Result<Value, AppError> {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| AppError::SchemaValidation(format!("{} is not a finite number", column)))
}

// NUMERIC columns (e.g. `cost DECIMAL(10,2)`) widen to float like the other numeric types.
fn decimal_value(column: &str, d: Decimal) -> Result<Value, AppError> {
    let n = d
        .to_f64()
        .ok_or_else(|| AppError::SchemaValidation(format!("{} is out of range", column)))?;
    float_value(column, n)
}

/// Validate a persisted record and build its wire shape. No defaulting: every field is required.
pub fn to_wire(record: &CampaignRecord) -> Result<Campaign, AppError> {
    Ok(Campaign {
        id: integer(record, "id")?,
        name: text(record, "name")?,
        status: text(record, "status")?,
        clicks: count(record, "clicks")?,
        cost: float(record, "cost")?,
        impressions: count(record, "impressions")?,
    })
}

/// Convert every record or fail on the first invalid one.
pub fn to_wire_all(records: &[CampaignRecord]) -> Result<Vec<Campaign>, AppError> {
    records.iter().map(to_wire).collect()
}

fn required<'a>(record: &'a CampaignRecord, field: &str) -> Result<&'a Value, AppError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(AppError::SchemaValidation(format!("{} is required", field))),
        Some(v) => Ok(v),
    }
}

fn integer(record: &CampaignRecord, field: &str) -> Result<i64, AppError> {
    required(record, field)?
        .as_i64()
        .ok_or_else(|| AppError::SchemaValidation(format!("{} must be an integer", field)))
}

fn count(record: &CampaignRecord, field: &str) -> Result<i64, AppError> {
    let n = integer(record, field)?;
    if n < 0 {
        return Err(AppError::SchemaValidation(format!("{} must be non-negative", field)));
    }
    Ok(n)
}

fn text(record: &CampaignRecord, field: &str) -> Result<String, AppError> {
    required(record, field)?
        .as_str()
        .map(String::from)
        .ok_or_else(|| AppError::SchemaValidation(format!("{} must be a string", field)))
}

// Integers widen to float here. NUMERIC values were already widened when the row was decoded.
fn float(record: &CampaignRecord, field: &str) -> Result<f64, AppError> {
    required(record, field)?
        .as_f64()
        .ok_or_else(|| AppError::SchemaValidation(format!("{} must be a number", field)))
}
