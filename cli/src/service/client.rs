use super::{handle_response, MessageBody};
use crate::{
    algebra::Gateway,
    domain::{ClientError, FormState},
};
use async_trait::async_trait;
use entities::{Id, Todo, Unit, DUE_DATE_FIELD, FILE_FIELD, TEXT_FIELD, TODOS_PATH};
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use tracing::debug;

/// [`Gateway`] over HTTP, as served by the `api` crate.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    http: Client,
}

impl HttpGateway {
    pub fn new(base_url: String, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}{}", self.base_url, TODOS_PATH)
    }

    fn todo_url(&self, id: &Id) -> String {
        format!("{}{}/{}", self.base_url, TODOS_PATH, id)
    }

    async fn multipart(form: &FormState) -> Result<Form, ClientError> {
        let mut multipart = Form::new()
            .text(TEXT_FIELD, form.text.clone())
            .text(DUE_DATE_FIELD, form.due_date.clone());

        if let Some(path) = &form.file {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::Attachment {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            debug!("Attaching {} ({} bytes)", path.display(), bytes.len());

            multipart = multipart.part(FILE_FIELD, Part::bytes(bytes).file_name(file_name));
        }

        Ok(multipart)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        handle_response(self.http.get(self.todos_url()).send().await).await
    }

    async fn create(&self, form: &FormState) -> Result<Todo, ClientError> {
        let multipart = Self::multipart(form).await?;

        handle_response(
            self.http
                .post(self.todos_url())
                .multipart(multipart)
                .send()
                .await,
        )
        .await
    }

    async fn update(&self, id: &Id, form: &FormState) -> Result<Todo, ClientError> {
        let multipart = Self::multipart(form).await?;

        handle_response(
            self.http
                .put(self.todo_url(id))
                .multipart(multipart)
                .send()
                .await,
        )
        .await
    }

    async fn delete(&self, id: &Id) -> Result<Unit, ClientError> {
        let body: MessageBody =
            handle_response(self.http.delete(self.todo_url(id)).send().await).await?;
        debug!("{}", body.message);

        Ok(())
    }
}
