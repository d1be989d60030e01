use super::{Keyed, Storage};
use crate::{ApplicationError, Id, InternalError, TodoError, Unit};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::RwLock;

/// Vec-backed store for tests and local development. Keeps insertion order.
///
/// Clones share the same records. [`InMemoryStore::set_available`] lets a test
/// simulate an unreachable backend.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
    available: Arc<AtomicBool>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            available: self.available.clone(),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<Unit, TodoError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(InternalError::storage("In-memory store is unavailable", None))
        }
    }
}

#[async_trait]
impl<T> Storage<T> for InMemoryStore<T>
where
    T: Keyed + Clone + Send + Sync,
{
    async fn get_many(&self) -> Result<Vec<T>, TodoError> {
        self.ensure_available()?;

        Ok(self.records.read().await.clone())
    }

    async fn get_one(&self, id: &Id) -> Result<Option<T>, TodoError> {
        self.ensure_available()?;

        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.key() == id)
            .cloned())
    }

    async fn create_one(&self, record: &T) -> Result<Unit, TodoError> {
        self.ensure_available()?;

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(InternalError::storage(
                &format!("Duplicate key {}", record.key()),
                Some("duplicate"),
            ));
        }
        records.push(record.clone());

        Ok(())
    }

    async fn update_one(&self, record: &T) -> Result<Unit, TodoError> {
        self.ensure_available()?;

        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.key() == record.key()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(ApplicationError::not_found(
                &format!("Record {}", record.key()),
                None,
            )),
        }
    }

    async fn delete_one(&self, id: &Id) -> Result<bool, TodoError> {
        self.ensure_available()?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.key() != id);

        Ok(records.len() < before)
    }

    async fn probe(&self) -> Result<bool, TodoError> {
        self.ensure_available()?;

        Ok(true)
    }
}
