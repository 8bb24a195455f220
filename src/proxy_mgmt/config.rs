use std::env;
use std::fmt;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;
use url::Url;

use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid upstream host '{value}': {source}")]
    InvalidHost {
        value: String,
        source: url::ParseError,
    },
    #[error("upstream host '{0}' must be an http(s) base URL")]
    UnsupportedHost(String),
    #[error("invalid proxy bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: Url,
    pub credentials: Option<Credentials>,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn new(host: &str, credentials: Option<Credentials>) -> Result<Self, ConfigError> {
        Ok(Config {
            host: parse_host(host)?,
            credentials,
            bind_addr: parse_bind_addr(defaults::PROXY_ADDR)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let host = non_empty_var(envvars::TB_HOST).unwrap_or_else(|| defaults::TB_HOST.to_string());
        let bind_addr =
            non_empty_var(envvars::TB_PROXY_ADDR).unwrap_or_else(|| defaults::PROXY_ADDR.to_string());

        // Missing credentials are reported per request, not at startup
        let credentials = match (non_empty_var(envvars::TB_USER), non_empty_var(envvars::TB_PASS)) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        Ok(Config {
            host: parse_host(&host)?,
            credentials,
            bind_addr: parse_bind_addr(&bind_addr)?,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn parse_host(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidHost {
        value: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedHost(raw.to_string()));
    }
    Ok(url)
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse::<SocketAddr>()
        .map_err(|source| ConfigError::InvalidBindAddr {
            value: raw.to_string(),
            source,
        })
}
