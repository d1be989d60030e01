use anyhow::Result;
use api::{domain::ApiConfig, server::Server};
use dotenvy::dotenv;
use envconfig::Envconfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ApiConfig::init_from_env()?;

    info!("Starting api with config:\n{config}");

    let server = Server::init(config).await?;

    server.run().await
}
