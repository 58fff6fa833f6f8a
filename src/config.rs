//! Runtime configuration, read from the environment (and `.env` if present).

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Context};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://messages.db?mode=rwc";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9250";
/// Signing keys shorter than this are refused by the cookie layer.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    /// Env: `DATABASE_URL`
    pub database_url: String,
    /// Env: `UPLOAD_DIR`
    pub upload_dir: PathBuf,
    /// Env: `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// Env: `SECRET_KEY`. `None` means a fresh key per process.
    pub secret_key: Option<Vec<u8>>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let upload_dir = PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_owned()));

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR {bind_addr:?} is not a socket address"))?;

        let secret_key = match lookup("SECRET_KEY") {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(anyhow!("SECRET_KEY must be at least {MIN_SECRET_LEN} bytes, got {}", secret.len()));
            }
            Some(secret) => Some(secret.into_bytes()),
            None => None,
        };

        Ok(Config { database_url, upload_dir, bind_addr, secret_key })
    }
}
