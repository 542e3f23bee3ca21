use time::Date;
use tracing::info;

use super::owner::DEMO_OWNER_ID;
use super::repo_types::NewRecord;
use super::transform::{demo_date, format_ymd};
use crate::error::RecordResult;
use crate::state::AppState;

/// Marker row claimed by the first process that seeds demo data.
pub const SEED_MARKER: &str = "demo-owner-v1";

/// (steps, calories) for one week of sample activity.
const DEMO_WEEK: [(i64, i64); 7] = [
    (8432, 2210),
    (10250, 2480),
    (6120, 1980),
    (12004, 2655),
    (7395, 2105),
    (9870, 2390),
    (5410, 1890),
];

pub fn demo_records(today: Date) -> Vec<NewRecord> {
    DEMO_WEEK
        .iter()
        .enumerate()
        .map(|(i, &(steps, calories))| NewRecord {
            owner_id: DEMO_OWNER_ID.to_owned(),
            date: demo_date(today, i).and_then(format_ymd).unwrap_or_default(),
            steps,
            calories,
        })
        .collect()
}

/// Inserts the demo week unless another run already did.
pub async fn seed_demo_owner(st: &AppState) -> RecordResult<bool> {
    let records = demo_records(st.clock.today());
    let count = records.len();
    let inserted = st
        .store
        .seed_once(SEED_MARKER, DEMO_OWNER_ID, records)
        .await?;
    if inserted {
        info!(count, owner_id = DEMO_OWNER_ID, "seeded demo records");
    } else {
        info!(owner_id = DEMO_OWNER_ID, "demo records already present; skipping seed");
    }
    Ok(inserted)
}
