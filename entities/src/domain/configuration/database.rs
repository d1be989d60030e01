use envconfig::Envconfig;
use std::fmt::{Display, Formatter};

#[derive(Envconfig, Clone)] // Intentionally no Debug so the connection string is not printed
pub struct DatabaseConfig {
    #[envconfig(from = "MONGO_URI", default = "mongodb://localhost:27017")]
    pub mongo_uri: String,
    #[envconfig(from = "MONGO_DB_NAME", default = "todos")]
    pub mongo_db_name: String,
}

impl DatabaseConfig {
    /// Connection string with any credentials replaced, safe for logs.
    pub fn redacted_uri(&self) -> String {
        match self.mongo_uri.split_once("://") {
            Some((scheme, rest)) => match rest.rsplit_once('@') {
                Some((_, host)) => format!("{scheme}://***@{host}"),
                None => self.mongo_uri.clone(),
            },
            None => "***".to_string(),
        }
    }
}

impl Display for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MONGO_URI: {}", self.redacted_uri())?;
        write!(f, "MONGO_DB_NAME: {}", self.mongo_db_name)
    }
}
