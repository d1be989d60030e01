use super::{Keyed, Storage, Store};
use crate::{ApplicationError, Id, TodoError, Unit, ID_KEY};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MongoStore<T: Send + Sync> {
    database: Database,
    pub collection: Collection<T>,
}

impl<T: Send + Sync> MongoStore<T> {
    pub fn new(database: &Database, store: &Store) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection::<T>(store.as_ref()),
        }
    }
}

#[async_trait]
impl<T> Storage<T> for MongoStore<T>
where
    T: Keyed + Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn get_many(&self) -> Result<Vec<T>, TodoError> {
        let cursor = self.collection.find(doc! {}).await?;
        let records: Vec<T> = cursor.try_collect().await?;

        debug!(
            "Fetched {} records from {}",
            records.len(),
            self.collection.name()
        );

        Ok(records)
    }

    async fn get_one(&self, id: &Id) -> Result<Option<T>, TodoError> {
        Ok(self
            .collection
            .find_one(doc! { ID_KEY: id.as_str() })
            .await?)
    }

    async fn create_one(&self, record: &T) -> Result<Unit, TodoError> {
        self.collection.insert_one(record).await?;

        Ok(())
    }

    async fn update_one(&self, record: &T) -> Result<Unit, TodoError> {
        let id = record.key();
        let result = self
            .collection
            .replace_one(doc! { ID_KEY: id.as_str() }, record)
            .await?;

        if result.matched_count == 0 {
            return Err(ApplicationError::not_found(
                &format!("Record {id} in {}", self.collection.name()),
                None,
            ));
        }

        Ok(())
    }

    async fn delete_one(&self, id: &Id) -> Result<bool, TodoError> {
        let result = self
            .collection
            .delete_one(doc! { ID_KEY: id.as_str() })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn probe(&self) -> Result<bool, TodoError> {
        self.database.run_command(doc! { "ping": 1 }).await?;

        Ok(true)
    }
}
