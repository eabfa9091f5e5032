use std::env::var;

use dotenvy::dotenv;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com";
pub const DEFAULT_GRAPH_API_VERSION: &str = "v21.0";
pub const DEFAULT_AUTO_REPLY_TEXT: &str = "Thanks! You will receive sensor alerts here.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("An error occured while parsing {name} env param: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub page_access_token: Option<String>,
    pub verify_token: Option<String>,
    pub graph_api_base: String,
    pub graph_api_version: String,
    pub auto_reply_enabled: bool,
    pub auto_reply_text: String,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| var(name).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    name: "PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        let auto_reply_enabled = match get("AUTO_REPLY_ENABLED") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "AUTO_REPLY_ENABLED",
                value,
            })?,
            None => true,
        };

        Ok(Config {
            port,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            page_access_token: get("PAGE_ACCESS_TOKEN"),
            verify_token: get("VERIFY_TOKEN"),
            graph_api_base: get("GRAPH_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE.to_string()),
            graph_api_version: get("GRAPH_API_VERSION")
                .unwrap_or_else(|| DEFAULT_GRAPH_API_VERSION.to_string()),
            auto_reply_enabled,
            auto_reply_text: get("AUTO_REPLY_TEXT")
                .unwrap_or_else(|| DEFAULT_AUTO_REPLY_TEXT.to_string()),
        })
    }

    /// Text for the webhook acknowledgment, or `None` when auto-reply is off.
    pub fn auto_reply(&self) -> Option<String> {
        self.auto_reply_enabled
            .then(|| self.auto_reply_text.clone())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
