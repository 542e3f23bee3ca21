use tracing::debug;

use super::owner::Owner;
use super::repo_types::{NewRecord, Record, RecordId, RecordUpdate};
use super::transform::shift_demo_dates;
use crate::error::{RecordError, RecordResult};
use crate::state::AppState;

/// Records of `owner` in storage order, with demo dates applied when the
/// owner is the demo owner and the shift is enabled.
pub async fn list_for_owner(st: &AppState, owner: &Owner) -> RecordResult<Vec<Record>> {
    let mut records = st.store.list_by_owner(owner.as_str()).await?;
    if owner.is_demo() && st.config.demo.date_shift {
        let today = st.clock.today();
        debug!(%today, count = records.len(), "shifting demo dates");
        shift_demo_dates(&mut records, today);
    }
    Ok(records)
}

/// Stores under the resolved owner, so an empty owner id lands on the demo
/// owner that an empty-owner list reads.
pub async fn create_record(st: &AppState, mut new: NewRecord) -> RecordResult<Record> {
    if let Owner::Demo = Owner::resolve(Some(&new.owner_id)) {
        new.owner_id = Owner::Demo.as_str().to_owned();
    }
    st.store.create(new).await
}

pub async fn update_record(st: &AppState, raw_id: &str, changes: RecordUpdate) -> RecordResult<Record> {
    let id = parse_id(raw_id)?;
    st.store.update_by_id(id, changes).await
}

pub async fn delete_record(st: &AppState, raw_id: &str) -> RecordResult<()> {
    let id = parse_id(raw_id)?;
    st.store.delete_by_id(id).await
}

/// A malformed id names no stored record.
fn parse_id(raw: &str) -> RecordResult<RecordId> {
    raw.parse::<RecordId>().map_err(|_| RecordError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::owner::DEMO_OWNER_ID;
    use std::sync::Arc;
    use time::macros::date;

    fn new_record(owner: &str, date: &str, steps: i64, calories: i64) -> NewRecord {
        NewRecord {
            owner_id: owner.into(),
            date: date.into(),
            steps,
            calories,
        }
    }

    fn changes(date: &str, steps: i64, calories: i64) -> RecordUpdate {
        RecordUpdate {
            date: date.into(),
            steps,
            calories,
        }
    }

    #[tokio::test]
    async fn real_owner_sees_stored_dates() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let created = create_record(&st, new_record("u1", "2025-03-01", 1000, 50))
            .await
            .expect("create");

        let listed = list_for_owner(&st, &Owner::resolve(Some("u1"))).await.expect("list");
        assert_eq!(listed, vec![created]);
        assert_eq!(listed[0].date, "2025-03-01");
    }

    #[tokio::test]
    async fn demo_owner_sees_shifted_dates_and_store_is_untouched() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let a = create_record(&st, new_record(DEMO_OWNER_ID, "2000-01-01", 100, 10)).await.unwrap();
        let b = create_record(&st, new_record(DEMO_OWNER_ID, "2000-01-02", 200, 20)).await.unwrap();

        let listed = list_for_owner(&st, &Owner::Demo).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!((listed[0].id, listed[0].date.as_str()), (a.id, "2025-03-08"));
        assert_eq!((listed[1].id, listed[1].date.as_str()), (b.id, "2025-03-07"));
        assert_eq!(listed[1].steps, 200);

        let stored = st.store.list_by_owner(DEMO_OWNER_ID).await.unwrap();
        assert_eq!(stored, vec![a, b]);
    }

    #[tokio::test]
    async fn empty_owner_reads_demo_records() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        create_record(&st, new_record(DEMO_OWNER_ID, "x", 1, 1)).await.unwrap();

        let listed = list_for_owner(&st, &Owner::resolve(Some(""))).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].date, "2025-03-08");
    }

    #[tokio::test]
    async fn empty_owner_on_create_is_listed_as_demo() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let created = create_record(&st, new_record("", "2000-01-01", 321, 12))
            .await
            .expect("create");
        assert_eq!(created.owner_id, DEMO_OWNER_ID);

        let listed = list_for_owner(&st, &Owner::resolve(Some(""))).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].steps, 321);
        assert_eq!(listed[0].date, "2025-03-08");
    }

    #[tokio::test]
    async fn date_shift_can_be_disabled() {
        let mut st = AppState::fake(date!(2025 - 03 - 10));
        let mut config = (*st.config).clone();
        config.demo.date_shift = false;
        st.config = Arc::new(config);

        create_record(&st, new_record(DEMO_OWNER_ID, "2000-01-01", 1, 1)).await.unwrap();
        let listed = list_for_owner(&st, &Owner::Demo).await.unwrap();
        assert_eq!(listed[0].date, "2000-01-01");
    }

    #[tokio::test]
    async fn update_then_read_reflects_new_fields() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let created = create_record(&st, new_record("u1", "2025-03-01", 1000, 50)).await.unwrap();

        let updated = update_record(&st, &created.id.to_string(), changes("2025-03-02", 1500, 75))
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, "u1");

        let listed = list_for_owner(&st, &Owner::Real("u1".into())).await.unwrap();
        assert_eq!(listed, vec![updated]);
        assert_eq!((listed[0].date.as_str(), listed[0].steps, listed[0].calories), ("2025-03-02", 1500, 75));
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_is_not_found() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let kept = create_record(&st, new_record("u1", "2025-03-01", 1, 1)).await.unwrap();

        let err = update_record(&st, "nonexistent-id", changes("2025-01-01", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));
        let err = delete_record(&st, "nonexistent-id").await.unwrap_err();
        assert!(matches!(err, RecordError::NotFound));

        let unknown = RecordId::new().to_string();
        assert!(matches!(
            update_record(&st, &unknown, changes("2025-01-01", 1, 1)).await,
            Err(RecordError::NotFound)
        ));
        assert!(matches!(delete_record(&st, &unknown).await, Err(RecordError::NotFound)));

        let listed = list_for_owner(&st, &Owner::Real("u1".into())).await.unwrap();
        assert_eq!(listed, vec![kept]);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let st = AppState::fake(date!(2025 - 03 - 10));
        let r = create_record(&st, new_record("u1", "2025-03-01", 1, 1)).await.unwrap();
        let id = r.id.to_string();

        delete_record(&st, &id).await.expect("delete");
        assert!(matches!(delete_record(&st, &id).await, Err(RecordError::NotFound)));
        assert!(matches!(
            update_record(&st, &id, changes("2025-03-02", 2, 2)).await,
            Err(RecordError::NotFound)
        ));
        assert!(list_for_owner(&st, &Owner::Real("u1".into())).await.unwrap().is_empty());
    }
}
