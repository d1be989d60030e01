use crate::{Id, TodoError, Unit};
use async_trait::async_trait;

/// Records that carry their own primary key.
pub trait Keyed {
    fn key(&self) -> &Id;
}

/// Collection names, one per stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Store {
    Todos,
}

#[async_trait]
pub trait Storage<T>: Send + Sync
where
    T: Keyed + Send + Sync,
{
    /// Every record, in whatever order the backend keeps them.
    async fn get_many(&self) -> Result<Vec<T>, TodoError>;

    async fn get_one(&self, id: &Id) -> Result<Option<T>, TodoError>;

    async fn create_one(&self, record: &T) -> Result<Unit, TodoError>;

    /// Replaces the stored record with the same key. Fails with not found when
    /// the key is unknown.
    async fn update_one(&self, record: &T) -> Result<Unit, TodoError>;

    /// Returns whether a record was actually removed.
    async fn delete_one(&self, id: &Id) -> Result<bool, TodoError>;

    async fn probe(&self) -> Result<bool, TodoError>;
}
