use crate::{domain::ApiConfig, helper::ContentDir, logic::TodoGateway, router};
use anyhow::{anyhow, Context, Result};
use axum::Router;
use entities::{MongoStore, Storage, Store, Todo};
use mongodb::Client;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub gateway: TodoGateway,
}

#[derive(Clone)]
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Connects to MongoDB and prepares the content directory.
    pub async fn init(config: ApiConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.db_config.mongo_uri)
            .await
            .with_context(|| "Could not parse MONGO_URI")?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.db_config.mongo_db_name));

        let store: Arc<dyn Storage<Todo>> = Arc::new(MongoStore::<Todo>::new(&db, &Store::Todos));

        // The driver connects lazily; report reachability without blocking startup
        let probe = store.clone();
        tokio::spawn(async move {
            match probe.probe().await {
                Ok(_) => info!("MongoDB connected"),
                Err(e) => error!("MongoDB connection error: {e}"),
            }
        });

        Self::with_store(config, store).await
    }

    pub async fn with_store(config: ApiConfig, store: Arc<dyn Storage<Todo>>) -> Result<Self> {
        let content = ContentDir::init(&config.content_dir)
            .await
            .with_context(|| "Could not prepare the content directory")?;

        Ok(Self {
            state: Arc::new(AppState {
                gateway: TodoGateway::new(store, content),
                config,
            }),
        })
    }

    pub fn router(&self) -> Result<Router> {
        let app = router::get_router(&self.state)?;

        Ok(app.with_state(self.state.clone()))
    }

    pub async fn run(&self) -> Result<()> {
        let tcp_listener = TcpListener::bind(&self.state.config.address).await?;

        info!("Api server listening on {}", self.state.config.address);

        self.serve(tcp_listener).await
    }

    pub async fn serve(&self, tcp_listener: TcpListener) -> Result<()> {
        let app = self.router()?;

        axum::serve(tcp_listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow!("Server error: {}", e))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received, draining connections");
}
