//! Environment-driven settings for binaries built on herald.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HERALD_ADDR` | `0.0.0.0:3000` | socket address the server binds |
//! | `HERALD_CACHE_DAYS` | `30` | lifetime handed to [`HttpCache`](crate::middleware::cache::HttpCache) |

use std::env;
use std::net::SocketAddr;

use crate::error::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CACHE_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub cache_days: u32,
}

impl Config {
    /// Loads a `.env` file if one exists, then reads the environment.
    pub fn load() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads settings from the process environment only.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let addr: SocketAddr = lookup("HERALD_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned())
            .parse()
            .map_err(|e: std::net::AddrParseError| Error::Config {
                key: "HERALD_ADDR",
                reason: e.to_string(),
            })?;

        let cache_days: u32 = match lookup("HERALD_CACHE_DAYS") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| Error::Config {
                key: "HERALD_CACHE_DAYS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CACHE_DAYS,
        };

        Ok(Self { addr, cache_days })
    }
}
