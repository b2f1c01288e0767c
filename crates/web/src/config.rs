use std::path::PathBuf;

use anyhow::{Context, Result, bail};

const DEFAULT_TENANT_DB_DIR: &str = "./tenant_db";
const DEFAULT_BASE_HOSTNAME: &str = ".t.scoreboard.local";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockBackend {
    /// `flock(2)` on a lock file per tenant, safe across processes
    File,
    /// Process-local mutexes
    Memory,
}

impl std::str::FromStr for LockBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown lock backend {:?}, expected file or memory", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub tenant_db_dir: PathBuf,
    pub tenant_schema_file: Option<PathBuf>,
    pub jwt_public_key_file: PathBuf,
    pub base_hostname: String,
    pub lock_backend: LockBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            tenant_db_dir: std::env::var("TENANT_DB_DIR")
                .unwrap_or_else(|_| DEFAULT_TENANT_DB_DIR.to_string())
                .into(),
            tenant_schema_file: std::env::var("TENANT_SCHEMA_FILE").ok().map(PathBuf::from),
            jwt_public_key_file: std::env::var("JWT_PUBLIC_KEY_FILE")
                .context("Cannot load JWT_PUBLIC_KEY_FILE env variable")?
                .into(),
            base_hostname: std::env::var("BASE_HOSTNAME")
                .unwrap_or_else(|_| DEFAULT_BASE_HOSTNAME.to_string()),
            lock_backend: std::env::var("LOCK_BACKEND")
                .unwrap_or_else(|_| "file".to_string())
                .parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_backend_parsing() {
        assert_eq!("file".parse::<LockBackend>().unwrap(), LockBackend::File);
        assert_eq!("memory".parse::<LockBackend>().unwrap(), LockBackend::Memory);
        assert!("redis".parse::<LockBackend>().is_err());
    }
}
