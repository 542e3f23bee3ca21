use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One day's activity measurement for an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub owner_id: String,
    pub date: String,
    pub steps: i64,
    pub calories: i64,
}

/// Fields supplied by the caller on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub owner_id: String,
    pub date: String,
    pub steps: i64,
    pub calories: i64,
}

impl NewRecord {
    pub(crate) fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            owner_id: self.owner_id,
            date: self.date,
            steps: self.steps,
            calories: self.calories,
        }
    }
}

/// The mutable part of a record; `id` and `owner_id` never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub date: String,
    pub steps: i64,
    pub calories: i64,
}

impl RecordUpdate {
    pub(crate) fn apply(self, record: &mut Record) {
        record.date = self.date;
        record.steps = self.steps;
        record.calories = self.calories;
    }
}
