//! Process configuration, read from the environment once at startup.

use std::net::SocketAddr;

use thiserror::Error;

use usersvc_auth::{ApiToken, StaticTokenSet};

pub const BIND_ADDR_VAR: &str = "USERSVC_BIND_ADDR";
pub const API_TOKENS_VAR: &str = "USERSVC_API_TOKENS";
pub const DISCLOSE_IDS_VAR: &str = "USERSVC_DISCLOSE_IDS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must be true or false, got: {value}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub tokens: StaticTokenSet,
    /// Include the live id list in not-found bodies.
    pub disclose_ids_on_not_found: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: bind_raw.clone(),
            })?;

        let configured: Vec<ApiToken> = lookup(API_TOKENS_VAR)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| ApiToken::new(t.to_string()))
            .collect();
        let tokens = if configured.is_empty() {
            tracing::warn!("{API_TOKENS_VAR} not set; using insecure development tokens");
            StaticTokenSet::development()
        } else {
            StaticTokenSet::new(configured)
        };

        let disclose_ids_on_not_found = match lookup(DISCLOSE_IDS_VAR) {
            None => true,
            Some(raw) => parse_flag(DISCLOSE_IDS_VAR, &raw)?,
        };

        Ok(Self {
            bind_addr,
            tokens,
            disclose_ids_on_not_found,
        })
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
