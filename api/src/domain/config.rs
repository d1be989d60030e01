use entities::DatabaseConfig;
use envconfig::Envconfig;
use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

#[derive(Envconfig, Clone)] // Intentionally no Debug so the database secret is not printed
pub struct ApiConfig {
    #[envconfig(from = "SERVER_ADDRESS", default = "0.0.0.0:3000")]
    pub address: String,
    #[envconfig(from = "CONTENT_DIR", default = "public/uploads")]
    pub content_dir: PathBuf,
    #[envconfig(from = "ALLOWED_ORIGIN", default = "http://localhost:5173")]
    pub allowed_origin: String,
    #[envconfig(from = "MAX_UPLOAD_SIZE_BYTES", default = "10485760")]
    pub max_upload_size_bytes: usize,
    #[envconfig(nested = true)]
    pub db_config: DatabaseConfig,
}

impl Display for ApiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SERVER_ADDRESS: {}", self.address)?;
        writeln!(f, "CONTENT_DIR: {}", self.content_dir.display())?;
        writeln!(f, "ALLOWED_ORIGIN: {}", self.allowed_origin)?;
        writeln!(f, "MAX_UPLOAD_SIZE_BYTES: {}", self.max_upload_size_bytes)?;
        write!(f, "{}", self.db_config)
    }
}
