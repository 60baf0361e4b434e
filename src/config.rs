use std::net::SocketAddr;

/// Default embedded database location, created on first run
const DEFAULT_DATABASE_URL: &str = "sqlite://userdeck.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Loads settings from `DATABASE_URL` and `BIND_ADDR`, falling back to
    /// defaults with a warning when unset or malformed
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });

        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    tracing::warn!(%raw, "BIND_ADDR is not a valid socket address, using default");
                    None
                }
            })
            .unwrap_or_else(|| {
                DEFAULT_BIND_ADDR
                    .parse()
                    .expect("default bind address is valid")
            });

        Self {
            database_url,
            bind_addr,
        }
    }
}
