//! Configuration for the Storage Gateway
//!
//! Settings are read once at startup from the process environment (and a
//! `.env` file when present) and handed to the application explicitly.
//! Nothing is reloaded at runtime.

use anyhow::{Context, Result};
use std::fmt;

/// Main configuration structure for the Storage Gateway
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup),
            logging: LoggingConfig::from_lookup(&lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request body cap in megabytes. `0` disables the cap.
    pub upload_body_limit_mb: usize,
}

impl ServerConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
            upload_body_limit_mb: lookup("UPLOAD_BODY_LIMIT_MB")
                .unwrap_or_else(|| "100".to_string())
                .parse()
                .context("Invalid UPLOAD_BODY_LIMIT_MB")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }
        Ok(())
    }

    /// Body limit in bytes, or `None` when disabled
    pub fn body_limit_bytes(&self) -> Option<usize> {
        match self.upload_body_limit_mb {
            0 => None,
            mb => Some(mb * 1024 * 1024),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upload_body_limit_mb: 100,
        }
    }
}

/// Object store configuration
#[derive(Clone, Default)]
pub struct StorageConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: String,
    pub region: String,
    /// S3-compatible endpoint override (MinIO, LocalStack, ...)
    pub endpoint: Option<String>,
}

impl StorageConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            access_key: non_empty("AWS_ACCESS_KEY"),
            secret_key: non_empty("AWS_SECRET_KEY"),
            bucket: non_empty("S3_BUCKET_NAME").unwrap_or_default(),
            region: non_empty("S3_REGION").unwrap_or_default(),
            endpoint: non_empty("S3_ENDPOINT").map(|e| e.trim_end_matches('/').to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            anyhow::bail!("S3_BUCKET_NAME must be set");
        }
        if self.region.is_empty() {
            anyhow::bail!("S3_REGION must be set");
        }
        Ok(())
    }

    /// Static key pair, if both halves are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");

        f.debug_struct("StorageConfig")
            .field("access_key", &redact(&self.access_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
    /// Compact format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => anyhow::bail!("Unknown log format '{}'", other),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: lookup("LOG_FORMAT")
                .map(|v| v.parse::<LogFormat>())
                .transpose()
                .context("Invalid LOG_FORMAT")?
                .unwrap_or_default(),
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
