use clap::Parser;
use std::error::Error;
use todo_cli::{algebra::Handler, service::TodoCli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = TodoCli::parse();
    let context = args.load().await?;
    args.validate(&context).await?;
    args.run(&context).await?;

    Ok(())
}
