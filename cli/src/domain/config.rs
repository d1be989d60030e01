use super::{ClientError, CONFIG_FILE_NAME, CONFIG_FILE_PATH, DEFAULT_API, ENV_PREFIX};
use config::{Config, Environment, File};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Serialize)]
pub struct CliConfig {
    api_base_url: String,
    http_timeout: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API.to_string(),
            http_timeout: None,
        }
    }
}

impl CliConfig {
    pub fn new(api_base_url: String, http_timeout: Option<u64>) -> Self {
        Self {
            api_base_url,
            http_timeout,
        }
    }

    /// Layers `TODO_*` environment variables over the optional config file
    /// over the defaults.
    pub fn load() -> Result<CliConfig, ClientError> {
        CliConfig::load_from(CliConfig::path().as_deref(), None)
    }

    /// Like [`CliConfig::load`], with an explicit file and, for tests, an
    /// explicit environment instead of the process one.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<CliConfig, ClientError> {
        let mut builder = Config::builder().set_default("api_base_url", DEFAULT_API)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let configuration = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    /// `~/.todo/config.toml`, when a home directory can be found.
    pub fn path() -> Option<PathBuf> {
        BaseDirs::new().map(|d| d.home_dir().join(CONFIG_FILE_PATH).join(CONFIG_FILE_NAME))
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let contents = toml::to_string(self).map_err(|e| ClientError::Config(e.to_string()))?;
        write(path, contents)?;

        Ok(())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn http_timeout(&self) -> Option<u64> {
        self.http_timeout
    }
}
