use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::repo_types::{NewRecord, Record, RecordUpdate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    #[serde(alias = "userId")]
    pub owner_id: String,
    #[serde(deserialize_with = "coerce_text")]
    pub date: String,
    #[serde(deserialize_with = "coerce_count")]
    pub steps: i64,
    #[serde(deserialize_with = "coerce_count")]
    pub calories: i64,
}

impl From<CreateRecordRequest> for NewRecord {
    fn from(r: CreateRecordRequest) -> Self {
        Self {
            owner_id: r.owner_id,
            date: r.date,
            steps: r.steps,
            calories: r.calories,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(deserialize_with = "coerce_text")]
    pub date: String,
    #[serde(deserialize_with = "coerce_count")]
    pub steps: i64,
    #[serde(deserialize_with = "coerce_count")]
    pub calories: i64,
}

impl From<UpdateRecordRequest> for RecordUpdate {
    fn from(r: UpdateRecordRequest) -> Self {
        Self {
            date: r.date,
            steps: r.steps,
            calories: r.calories,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
}

impl MessageResponse {
    pub fn text(message: &'static str) -> Self {
        Self { message, data: None }
    }

    pub fn with_data(message: &'static str, data: Record) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Integer from a JSON integer, an integral float, or a numeric string.
fn coerce_count<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| de::Error::custom(format!("{n} is not an integer count"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("{s:?} is not an integer count"))),
        other => Err(de::Error::custom(format!("expected an integer count, got {other}"))),
    }
}

/// String as-is; numbers and booleans are stringified.
fn coerce_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        v @ (Value::Number(_) | Value::Bool(_)) => Ok(v.to_string()),
        other => Err(de::Error::custom(format!("expected a string, got {other}"))),
    }
}
