use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where `/cv/export` writes rendered PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportBackend {
    Local,
    S3,
}

impl FromStr for ExportBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ExportBackend::Local),
            "s3" => Ok(ExportBackend::S3),
            other => bail!("EXPORT_BACKEND must be 'local' or 's3', got '{other}'"),
        }
    }
}

/// Credentials and target for the S3 (or MinIO) export backend.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable required by the chosen backend is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub export_backend: ExportBackend,
    pub export_dir: PathBuf,
    /// Present only when `export_backend` is `S3`.
    pub s3: Option<S3Settings>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let export_backend: ExportBackend = std::env::var("EXPORT_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse()?;

        let s3 = match export_backend {
            ExportBackend::S3 => Some(S3Settings {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            }),
            ExportBackend::Local => None,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export_backend,
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./exports")),
            s3,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
