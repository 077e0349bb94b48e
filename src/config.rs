//! Application configuration loaded from environment variables and CLI flags.
//!
//! Configuration is loaded once at startup and validated before any source
//! is read. CLI flags take priority over environment variables.
//!
//! ## Variables
//!
//! - `REDIRECT_YAML_FILE` / `--yamlfile` - YAML source (optional)
//! - `REDIRECT_JSON_FILE` / `--jsonfile` - JSON source (optional)
//! - `REDIRECT_STORE_FILE` / `--boltfile` - redb store file (default: `redirects.redb`)
//! - `LISTEN` / `--listen` - Bind address (default: `0.0.0.0:8080`)
//! - `STORE_OPEN_TIMEOUT` - Seconds to wait for a locked store (default: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Redirects compiled into the service, served with the highest priority.
pub const BUILTIN_REDIRECTS: &[(&str, &str)] = &[
    (
        "/urlshort-godoc",
        "https://godoc.org/github.com/gophercises/urlshort",
    ),
    ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
];

pub const DEFAULT_STORE_FILE: &str = "redirects.redb";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Command-line flags of the server binary.
#[derive(Debug, Default, Parser)]
#[command(name = "url-redirect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file with `path`/`url` redirect records
    #[arg(long = "yamlfile", value_name = "PATH")]
    pub yaml_file: Option<PathBuf>,

    /// JSON file with `path`/`url` redirect records
    #[arg(long = "jsonfile", value_name = "PATH")]
    pub json_file: Option<PathBuf>,

    /// redb store file with redirects (created if absent)
    #[arg(long = "boltfile", value_name = "PATH")]
    pub store_file: Option<PathBuf>,

    /// Address to listen on, `host:port`
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub yaml_file: Option<PathBuf>,
    pub json_file: Option<PathBuf>,
    pub store_file: PathBuf,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// How long to keep retrying while the store file is locked by another process.
    pub store_open_timeout: Duration,
    /// `(path, url)` pairs for the in-memory source.
    pub static_redirects: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            yaml_file: None,
            json_file: None,
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            store_open_timeout: Duration::from_secs(10),
            static_redirects: BUILTIN_REDIRECTS
                .iter()
                .map(|(path, url)| (path.to_string(), url.to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let yaml_file = non_empty_var("REDIRECT_YAML_FILE").map(PathBuf::from);
        let json_file = non_empty_var("REDIRECT_JSON_FILE").map(PathBuf::from);
        let store_file = non_empty_var("REDIRECT_STORE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_file);

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let store_open_timeout = env::var("STORE_OPEN_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.store_open_timeout);

        Self {
            yaml_file,
            json_file,
            store_file,
            listen_addr,
            log_level,
            log_format,
            store_open_timeout,
            static_redirects: defaults.static_redirects,
        }
    }

    /// Overrides environment values with flags given on the command line.
    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(path) = cli.yaml_file {
            self.yaml_file = Some(path);
        }
        if let Some(path) = cli.json_file {
            self.json_file = Some(path);
        }
        if let Some(path) = cli.store_file {
            self.store_file = path;
        }
        if let Some(listen) = cli.listen {
            self.listen_addr = listen;
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `store_open_timeout` is zero
    /// - `store_file` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_open_timeout.is_zero() {
            anyhow::bail!("STORE_OPEN_TIMEOUT must be greater than 0");
        }

        if self.store_file.as_os_str().is_empty() {
            anyhow::bail!("Store file path must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Static redirects: {}", self.static_redirects.len());
        tracing::info!("  Store file: {}", self.store_file.display());
        tracing::info!("  YAML file: {}", display_optional(&self.yaml_file));
        tracing::info!("  JSON file: {}", display_optional(&self.json_file));
        tracing::info!("  Store open timeout: {:?}", self.store_open_timeout);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn display_optional(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Loads, applies CLI overrides, and validates configuration.
///
/// # Note
///
/// Expects `.env` to be already loaded (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load(cli: Cli) -> Result<Config> {
    let config = Config::from_env().apply_cli(cli);
    config.validate()?;
    Ok(config)
}
