//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Which `MovieStore` backend the server builds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    /// Schema holding the movies table (postgres only).
    pub schema: String,
    pub max_connections: u32,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            store: StoreBackend::Memory,
            schema: DEFAULT_SCHEMA.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|e| ConfigError::Invalid {
            name: "BIND_ADDR",
            reason: format!("{}: {}", bind_raw, e),
        })?;

        let database_url = get("DATABASE_URL");
        let store = match get("MOVIES_STORE").map(|s| s.to_lowercase()).as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres {
                database_url: database_url.ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "MOVIES_STORE",
                    reason: format!("{} (expected memory or postgres)", other),
                })
            }
            None => match database_url {
                Some(database_url) => StoreBackend::Postgres { database_url },
                None => StoreBackend::Memory,
            },
        };

        let schema = get("MOVIES_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        let max_connections = parse_positive(&get, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let max_body_bytes = parse_positive(&get, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;

        Ok(Settings {
            bind_addr,
            store,
            schema,
            max_connections,
            max_body_bytes,
        })
    }
}

fn parse_positive<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(name) else {
        return Ok(default);
    };
    let value: T = raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: format!("{}: {}", raw, e),
    })?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("{} must be positive", raw),
        });
    }
    Ok(value)
}
