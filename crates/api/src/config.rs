//! Server configuration from the command line and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 1234;
pub const PORT_VAR: &str = "LEDGER_PORT";
pub const HOST_VAR: &str = "LEDGER_HOST";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {value:?} (from {source_name})")]
    InvalidPort {
        value: String,
        source_name: &'static str,
    },

    #[error("invalid bind host {0:?}")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Resolve the listen address.
    ///
    /// Port: first positional argument, else `LEDGER_PORT`, else 1234.
    /// Host: `LEDGER_HOST`, else `0.0.0.0`. `args` excludes the program name.
    pub fn from_env_and_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::resolve(
            args.into_iter().next(),
            std::env::var(PORT_VAR).ok(),
            std::env::var(HOST_VAR).ok(),
        )
    }

    fn resolve(
        arg_port: Option<String>,
        env_port: Option<String>,
        env_host: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = arg_port {
            config.port = parse_port(value, "command line")?;
        } else if let Some(value) = env_port {
            config.port = parse_port(value, PORT_VAR)?;
        }

        if let Some(value) = env_host {
            config.host = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(value))?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(value: String, source_name: &'static str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort { value, source_name })
}
