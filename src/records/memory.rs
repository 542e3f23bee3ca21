use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repo::RecordStore;
use super::repo_types::{NewRecord, Record, RecordId, RecordUpdate};
use crate::error::{RecordError, RecordResult};

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    markers: HashSet<String>,
}

/// Process-local store. Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, new: NewRecord) -> RecordResult<Record> {
        let record = new.into_record(RecordId::new());
        self.inner.write().await.records.push(record.clone());
        Ok(record)
    }

    async fn list_by_owner(&self, owner_id: &str) -> RecordResult<Vec<Record>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: RecordId, changes: RecordUpdate) -> RecordResult<Record> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecordError::NotFound)?;
        changes.apply(record);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: RecordId) -> RecordResult<()> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(RecordError::NotFound)?;
        inner.records.remove(pos);
        Ok(())
    }

    async fn seed_once(
        &self,
        marker: &str,
        owner_id: &str,
        records: Vec<NewRecord>,
    ) -> RecordResult<bool> {
        let mut inner = self.inner.write().await;
        if !inner.markers.insert(marker.to_owned()) {
            return Ok(false);
        }
        if inner.records.iter().any(|r| r.owner_id == owner_id) {
            return Ok(false);
        }
        inner
            .records
            .extend(records.into_iter().map(|n| n.into_record(RecordId::new())));
        Ok(true)
    }
}
