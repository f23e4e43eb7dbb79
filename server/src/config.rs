//! Server configuration from the process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid HOST {0:?}: expected an IP address")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST, port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`. Unset or blank variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match non_blank(lookup("HOST")) {
            Some(raw) => raw.parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => DEFAULT_HOST,
        };
        let port = match non_blank(lookup("PORT")) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidPort(raw.to_string())),
        Ok(port) => Ok(port),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
