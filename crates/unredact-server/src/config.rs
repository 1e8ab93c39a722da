//! Listener configuration from the environment.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::StartupError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Address the server binds to: all interfaces on `port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Read `PORT` from the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_port_var(std::env::var("PORT").ok().as_deref())
    }

    /// Build a config from the raw value of `PORT`.
    pub fn from_port_var(value: Option<&str>) -> Result<Self, StartupError> {
        match value {
            None => Ok(Self::default()),
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map(|port| Self { port })
                .map_err(|source| StartupError::InvalidPort {
                    value: raw.to_string(),
                    source,
                }),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
