use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::vies::VIES_SERVICE_URL;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// German VAT ID validation service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, env = "SERVICE_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port
    #[arg(short, long, env = "SERVICE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// VIES checkVat endpoint
    #[arg(long, env = "VIES_URL", default_value = VIES_SERVICE_URL)]
    pub vies_url: String,

    /// Budget for a single registry call, in seconds
    #[arg(
        long,
        env = "REGISTRY_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub registry_timeout_secs: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }
}
