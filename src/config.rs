use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::utils::time::DEFAULT_DATE_FORMAT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // API location
    pub api_base_url: String,
    pub api_prefix: String,
    pub request_timeout_secs: u64,

    // Rendering
    pub date_format: String,
    pub user_link_prefix: String,

    // Tag editor
    pub enable_tag_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            api_prefix: "/api/v1".to_string(),
            request_timeout_secs: 30,

            date_format: DEFAULT_DATE_FORMAT.to_string(),
            user_link_prefix: "/manage/users".to_string(),

            // Save has no agreed server contract yet, keep it a no-op unless asked
            enable_tag_save: false,
        }
    }
}

impl Config {
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(base_url) = env::var("ADMIN_API_BASE_URL") {
            config.api_base_url = base_url;
        }

        if let Ok(prefix) = env::var("ADMIN_API_PREFIX") {
            config.api_prefix = prefix;
        }

        if let Ok(timeout) = env::var("ADMIN_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.parse().map_err(|e| {
                ClientError::Config(format!("Invalid request_timeout_secs: {}", e))
            })?;
        }

        if let Ok(format) = env::var("ADMIN_DATE_FORMAT") {
            config.date_format = format;
        }

        if let Ok(prefix) = env::var("ADMIN_USER_LINK_PREFIX") {
            config.user_link_prefix = prefix;
        }

        if let Ok(save) = env::var("ADMIN_ENABLE_TAG_SAVE") {
            config.enable_tag_save = save
                .parse()
                .map_err(|e| ClientError::Config(format!("Invalid enable_tag_save: {}", e)))?;
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> ClientResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ClientError::Config(format!(
                "Invalid api_base_url: {}",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of an API endpoint, e.g. `http://host/api/v1/get_tag_info`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/'),
            endpoint
        )
    }
}
