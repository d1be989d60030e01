use api::{domain::ApiConfig, server::Server};
use entities::{InMemoryStore, Todo, TODOS_PATH};
use envconfig::Envconfig;
use http::{Method, StatusCode};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct ApiResponse<T> {
    pub code: StatusCode,
    pub data: T,
}

/// Runs the real router on an ephemeral port over an in-memory store and a
/// temporary content directory.
pub struct TestServer {
    pub address: String,
    pub client: reqwest::Client,
    pub store: InMemoryStore<Todo>,
    pub content_dir: TempDir,
}

impl TestServer {
    pub async fn new() -> Self {
        let content_dir = tempfile::tempdir().expect("Failed to create content dir");

        let config = ApiConfig::init_from_hashmap(&HashMap::from([
            (
                "CONTENT_DIR".to_string(),
                content_dir.path().display().to_string(),
            ),
            ("ALLOWED_ORIGIN".to_string(), ALLOWED_ORIGIN.to_string()),
        ]))
        .expect("Failed to load config");

        let store = InMemoryStore::new();
        let server = Server::with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to create server");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let port = listener.local_addr().expect("Failed to read address").port();

        tokio::spawn(async move { server.serve(listener).await });

        Self {
            address: format!("http://127.0.0.1:{port}"),
            client: reqwest::Client::new(),
            store,
            content_dir,
        }
    }

    pub async fn send_request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        form: Option<Form>,
    ) -> Result<ApiResponse<T>, reqwest::Error> {
        let mut req = self
            .client
            .request(method, format!("{}/{}", self.address, path.trim_start_matches('/')));
        if let Some(form) = form {
            req = req.multipart(form);
        }

        let res = req.send().await?;
        let code = res.status();
        let data = res.json().await?;

        Ok(ApiResponse { code, data })
    }

    pub async fn fetch_raw(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to fetch")
    }

    pub async fn list(&self) -> Vec<Todo> {
        let res = self
            .send_request::<Vec<Todo>>(TODOS_PATH, Method::GET, None)
            .await
            .expect("Failed to list todos");
        assert_eq!(res.code, StatusCode::OK);

        res.data
    }

    pub async fn create(&self, form: Form) -> Todo {
        let res = self
            .send_request::<Todo>(TODOS_PATH, Method::POST, Some(form))
            .await
            .expect("Failed to create todo");
        assert_eq!(res.code, StatusCode::CREATED);

        res.data
    }

    pub fn file_path(&self, attachment_path: &str) -> PathBuf {
        let name = attachment_path
            .rsplit('/')
            .next()
            .expect("Attachment path has no file name");

        self.content_dir.path().join(name)
    }
}

pub fn form(text: &str, due_date: &str) -> Form {
    Form::new()
        .text("text", text.to_string())
        .text("dueDate", due_date.to_string())
}

pub fn form_with_file(text: &str, due_date: &str, name: &str, bytes: &[u8]) -> Form {
    form(text, due_date).part(
        "file",
        Part::bytes(bytes.to_vec()).file_name(name.to_string()),
    )
}
