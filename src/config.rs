//! Command line and environment configuration for the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// The REST API server for the expense tracker.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Path to the SQLite database, optionally prefixed with `sqlite://`.
    ///
    /// If omitted, or if the database cannot be opened, expenses are kept in
    /// memory and lost when the server stops.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Do not insert sample expenses into an empty store.
    #[arg(long)]
    pub no_seed: bool,
}

impl ServerConfig {
    /// The socket address the server should listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use clap::Parser;

    use super::ServerConfig;

    #[test]
    fn parses_explicit_arguments() {
        let config = ServerConfig::try_parse_from([
            "server",
            "--database-url",
            "sqlite://expenses.db",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--no-seed",
        ])
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("sqlite://expenses.db"));
        assert!(config.no_seed);
        assert_eq!(
            config.socket_addr(),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080)
        );
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(ServerConfig::try_parse_from(["server", "--port", "not-a-port"]).is_err());
    }
}
