use crate::domain::{ClientError, FormState};
use async_trait::async_trait;
use entities::{Id, Todo, Unit};

/// The four requests the client issues against the todo gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;

    async fn create(&self, form: &FormState) -> Result<Todo, ClientError>;

    async fn update(&self, id: &Id, form: &FormState) -> Result<Todo, ClientError>;

    async fn delete(&self, id: &Id) -> Result<Unit, ClientError>;
}
