//! Startup configuration, read once from the environment (and `.env`).

use crate::database::{FileUserStore, UserStore};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "database type not specified, set DATABASE_TYPE to one of: {opts}",
        opts = DatabaseKind::options()
    )]
    MissingDatabaseType,

    #[error(
        "unrecognized database type \"{0}\", options are: {opts}",
        opts = DatabaseKind::options()
    )]
    UnknownDatabaseType(String),

    #[error("using a file as a database but no file path was provided through DATABASE_URL")]
    MissingFilePath,

    #[error("invalid PORT \"{0}\"")]
    InvalidPort(String),

    #[error("failed to prepare user store {path}: {source}")]
    OpenStore {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// A JSON file used as a pseudo-database; `DATABASE_URL` is its path.
    File,
}

impl DatabaseKind {
    const ALL: [DatabaseKind; 1] = [DatabaseKind::File];

    pub fn name(&self) -> &'static str {
        match self {
            DatabaseKind::File => "file",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == value)
    }

    fn options() -> String {
        Self::ALL.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub kind: DatabaseKind,
    pub url: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("PORT") {
            Some(p) => p.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let kind_name = non_empty("DATABASE_TYPE").ok_or(ConfigError::MissingDatabaseType)?;
        let kind = DatabaseKind::parse(kind_name.trim())
            .ok_or(ConfigError::UnknownDatabaseType(kind_name))?;

        let url = match kind {
            DatabaseKind::File => non_empty("DATABASE_URL").ok_or(ConfigError::MissingFilePath)?,
        };

        Ok(Self {
            host,
            port,
            database: DatabaseConfig {
                kind,
                url: PathBuf::from(url),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Opens the configured backend.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, ConfigError> {
    match config.kind {
        DatabaseKind::File => {
            let store = FileUserStore::open(&config.url)
                .await
                .map_err(|source| ConfigError::OpenStore {
                    path: config.url.clone(),
                    source,
                })?;
            Ok(Arc::new(store))
        }
    }
}
