//! Listener Config

use std::net::Ipv6Addr;

use clap::Args;

/// Where the API listens.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Host or IP address to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, bracketing IPv6 literals so the port stays unambiguous.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
