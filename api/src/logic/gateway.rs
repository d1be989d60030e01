use crate::helper::{ContentDir, TodoForm};
use entities::{
    parse_due_date, validate_text, ApplicationError, Id, Storage, Todo, TodoError,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Sole writer to the todo store and the content directory.
///
/// Record and file changes are not transactional. Writes put the new file in
/// place before the record points at it and reclaim superseded files only after
/// the record is saved; a failed reclaim is logged and leaves an orphan file.
#[derive(Clone)]
pub struct TodoGateway {
    store: Arc<dyn Storage<Todo>>,
    content: ContentDir,
}

impl TodoGateway {
    pub fn new(store: Arc<dyn Storage<Todo>>, content: ContentDir) -> Self {
        Self { store, content }
    }

    pub fn content(&self) -> &ContentDir {
        &self.content
    }

    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        self.store.get_many().await
    }

    pub async fn create(&self, form: TodoForm) -> Result<Todo, TodoError> {
        let text = validate_text(form.text.as_deref())?;
        let due_date = parse_due_date(form.due_date.as_deref())?;

        let attachment_path = match &form.attachment {
            Some(upload) => Some(self.content.store(upload).await?),
            None => None,
        };

        let todo = Todo::new(text, due_date, attachment_path);

        if let Err(e) = self.store.create_one(&todo).await {
            if let Some(path) = &todo.attachment_path {
                self.reclaim(path).await;
            }
            return Err(e);
        }

        info!(id = %todo.id, "Created todo");

        Ok(todo)
    }

    /// Full replace: text and due date always take the submitted values, the
    /// attachment only changes when a new file is submitted.
    pub async fn update(&self, id: &Id, form: TodoForm) -> Result<Todo, TodoError> {
        let mut todo = self.find(id).await?;

        let text = validate_text(form.text.as_deref())?;
        let due_date = parse_due_date(form.due_date.as_deref())?;

        let attachment_path = match &form.attachment {
            Some(upload) => Some(self.content.store(upload).await?),
            None => None,
        };

        let superseded = todo.replace(text, due_date, attachment_path.clone());

        if let Err(e) = self.store.update_one(&todo).await {
            if let Some(path) = &attachment_path {
                self.reclaim(path).await;
            }
            return Err(e);
        }

        if let Some(path) = superseded {
            self.reclaim(&path).await;
        }

        info!(id = %todo.id, "Updated todo");

        Ok(todo)
    }

    /// Removes the record, then its attachment. Returns the removed record.
    pub async fn delete(&self, id: &Id) -> Result<Todo, TodoError> {
        let todo = self.find(id).await?;

        if !self.store.delete_one(id).await? {
            return Err(ApplicationError::not_found(&format!("Todo {id}"), None));
        }

        if let Some(path) = &todo.attachment_path {
            self.reclaim(path).await;
        }

        info!(id = %todo.id, "Deleted todo");

        Ok(todo)
    }

    async fn find(&self, id: &Id) -> Result<Todo, TodoError> {
        self.store
            .get_one(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(&format!("Todo {id}"), None))
    }

    async fn reclaim(&self, path: &str) {
        if let Err(e) = self.content.remove(path).await {
            warn!("Could not reclaim attachment {path}: {e}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::helper::Upload;
    use axum::body::Bytes;
    use chrono::NaiveDate;
    use entities::{ErrorKind, IdPrefix, InMemoryStore};
    use tempfile::TempDir;

    async fn gateway() -> (TodoGateway, InMemoryStore<Todo>, TempDir) {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let store = InMemoryStore::new();
        let content = ContentDir::init(tmp.path()).await.unwrap();

        (
            TodoGateway::new(Arc::new(store.clone()), content),
            store,
            tmp,
        )
    }

    fn form(text: &str, due_date: &str, file: Option<(&str, &'static [u8])>) -> TodoForm {
        TodoForm {
            text: Some(text.to_string()),
            due_date: Some(due_date.to_string()),
            attachment: file.map(|(name, bytes)| Upload {
                file_name: Some(name.to_string()),
                bytes: Bytes::from_static(bytes),
            }),
        }
    }

    #[tokio::test]
    async fn create_persists_trimmed_text_and_due_date() {
        let (gateway, store, _tmp) = gateway().await;

        let todo = gateway.create(form("  Buy milk ", "2024-01-01", None)).await.unwrap();

        assert_eq!(todo.text, "Buy milk");
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(!todo.completed);
        assert_eq!(store.get_one(&todo.id).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn create_without_text_persists_nothing() {
        let (gateway, store, tmp) = gateway().await;

        let err = gateway
            .create(form("   ", "", Some(("a.png", b"png"))))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.is_empty().await);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failed_insert_reclaims_the_new_file() {
        let (gateway, store, tmp) = gateway().await;
        store.set_available(false);

        let err = gateway
            .create(form("Buy milk", "", Some(("a.png", b"png"))))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn update_replaces_the_attachment_file() {
        let (gateway, _store, _tmp) = gateway().await;
        let created = gateway
            .create(form("Report", "", Some(("draft.pdf", b"v1"))))
            .await
            .unwrap();
        let old_path = created.attachment_path.clone().unwrap();

        let updated = gateway
            .update(&created.id, form("Report", "", Some(("final.pdf", b"v2"))))
            .await
            .unwrap();
        let new_path = updated.attachment_path.clone().unwrap();

        assert_ne!(old_path, new_path);
        assert!(!gateway.content().resolve(&old_path).unwrap().exists());
        assert!(gateway.content().resolve(&new_path).unwrap().exists());
    }

    #[tokio::test]
    async fn update_tolerates_a_missing_old_file() {
        let (gateway, _store, _tmp) = gateway().await;
        let created = gateway
            .create(form("Report", "", Some(("draft.pdf", b"v1"))))
            .await
            .unwrap();
        let old_path = created.attachment_path.clone().unwrap();
        std::fs::remove_file(gateway.content().resolve(&old_path).unwrap()).unwrap();

        let updated = gateway
            .update(&created.id, form("Report v2", "", Some(("final.pdf", b"v2"))))
            .await
            .unwrap();

        assert_eq!(updated.text, "Report v2");
        assert_ne!(updated.attachment_path, Some(old_path));
    }

    #[tokio::test]
    async fn update_without_file_keeps_attachment_and_clears_due_date() {
        let (gateway, _store, _tmp) = gateway().await;
        let created = gateway
            .create(form("Buy milk", "2024-01-01", Some(("list.txt", b"milk"))))
            .await
            .unwrap();

        let updated = gateway
            .update(
                &created.id,
                TodoForm {
                    text: Some("Buy oat milk".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, "Buy oat milk");
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.attachment_path, created.attachment_path);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_of_unknown_id_changes_nothing() {
        let (gateway, store, _tmp) = gateway().await;
        let existing = gateway.create(form("keep", "", None)).await.unwrap();

        let err = gateway
            .update(&Id::now(IdPrefix::Todo), form("new", "", None))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.get_many().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn delete_removes_record_and_file() {
        let (gateway, store, _tmp) = gateway().await;
        let created = gateway
            .create(form("Scan", "", Some(("scan.jpg", b"jpg"))))
            .await
            .unwrap();
        let path = gateway
            .content()
            .resolve(created.attachment_path.as_deref().unwrap())
            .unwrap();

        gateway.delete(&created.id).await.unwrap();

        assert!(store.is_empty().await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_guards_unknown_ids() {
        let (gateway, _store, _tmp) = gateway().await;

        let err = gateway.delete(&Id::now(IdPrefix::Todo)).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_with_blank_text_changes_nothing() {
        let (gateway, store, tmp) = gateway().await;
        let created = gateway
            .create(form("Report", "2024-01-01", Some(("draft.pdf", b"v1"))))
            .await
            .unwrap();

        let err = gateway
            .update(&created.id, form("   ", "", Some(("final.pdf", b"v2"))))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.get_many().await.unwrap(), vec![created.clone()]);

        let files: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(
            files,
            vec![gateway
                .content()
                .resolve(created.attachment_path.as_deref().unwrap())
                .unwrap()]
        );
    }

    #[tokio::test]
    async fn failed_attachment_write_persists_nothing() {
        let (gateway, store, tmp) = gateway().await;
        std::fs::remove_dir_all(tmp.path()).unwrap();

        let err = gateway
            .create(form("Buy milk", "", Some(("list.txt", b"milk"))))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(store.is_empty().await);
    }
}
