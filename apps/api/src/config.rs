use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// S3 / MinIO target. Only present when all four variables are set.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Every key has a default except the optional S3 and font-directory overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub model_timeout: Duration,
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub background_template: String,
    pub team_descriptions_file: PathBuf,
    pub document_place: String,
    /// Overrides the default font search directories when set.
    pub font_dirs: Option<Vec<PathBuf>>,
    pub s3: Option<S3Config>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            model_timeout: Duration::from_secs(
                env_or("MODEL_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "output")),
            templates_dir: PathBuf::from(env_or("TEMPLATES_DIR", "templates")),
            background_template: env_or("BACKGROUND_TEMPLATE", "letterhead.pdf"),
            team_descriptions_file: PathBuf::from(env_or(
                "TEAM_DESCRIPTIONS_FILE",
                "data/opisy-zespoly.json",
            )),
            document_place: env_or("DOCUMENT_PLACE", "Łódź"),
            font_dirs: std::env::var("FONT_DIRS").ok().map(|v| split_paths(&v)),
            s3: s3_from_env()?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Full path of the letterhead PDF.
    pub fn letterhead_path(&self) -> PathBuf {
        self.templates_dir.join(&self.background_template)
    }
}

/// All-or-nothing: a partial S3 configuration is a startup error.
fn s3_from_env() -> Result<Option<S3Config>> {
    const KEYS: [&str; 4] = [
        "S3_BUCKET",
        "S3_ENDPOINT",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
    ];
    let present = KEYS.iter().filter(|k| std::env::var(k).is_ok()).count();
    if present == 0 {
        return Ok(None);
    }
    Ok(Some(S3Config {
        bucket: require_env("S3_BUCKET")?,
        endpoint: require_env("S3_ENDPOINT")?,
        access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
        secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
    }))
}

/// Colon-separated directory list, empty segments ignored.
fn split_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
