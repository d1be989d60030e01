use crate::{
    domain::{ClientError, CliConfig, DEFAULT_TIMEOUT_MILLIS},
    service::{HttpGateway, Printer},
};
use reqwest::ClientBuilder;
use std::time::Duration;

pub struct AppContext {
    config: CliConfig,
    printer: Printer,
    gateway: HttpGateway,
}

impl AppContext {
    pub fn new(config: CliConfig) -> Result<AppContext, ClientError> {
        let timeout =
            Duration::from_millis(config.http_timeout().unwrap_or(DEFAULT_TIMEOUT_MILLIS));
        let client = ClientBuilder::new().timeout(timeout).build()?;
        let gateway = HttpGateway::new(config.api_base_url().to_string(), client);

        Ok(AppContext {
            config,
            printer: Printer,
            gateway,
        })
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }
}
