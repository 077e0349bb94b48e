//! CLI administration tool for url-redirect.
//!
//! Manages the redb redirect store and checks YAML/JSON source files
//! without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # List store entries
//! cargo run --bin admin -- store list
//!
//! # Add or replace an entry
//! cargo run --bin admin -- store put /docs https://docs.example.com
//!
//! # Remove an entry
//! cargo run --bin admin -- store remove /docs
//!
//! # Validate a source file
//! cargo run --bin admin -- check urls.yaml
//! ```
//!
//! The server reads the store only at startup, so changes take effect on the
//! next restart. While the server is starting up the store may be locked;
//! commands wait up to `STORE_OPEN_TIMEOUT` seconds for it.

use url_redirect::config::Config;
use url_redirect::infrastructure::files::load_file_detect;
use url_redirect::infrastructure::store::RedirectStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

/// CLI tool for managing url-redirect sources.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// redb store file (defaults to `REDIRECT_STORE_FILE` or `redirects.redb`)
    #[arg(long = "boltfile", global = true, value_name = "PATH")]
    store_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the redirect store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Validate a YAML or JSON source file
    Check {
        /// File to check; format is taken from the extension
        file: PathBuf,
    },
}

/// Store management subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// List all entries
    List,

    /// Add or replace an entry
    Put {
        /// Request path, e.g. `/docs`
        path: String,

        /// Redirect target URL
        url: String,
    },

    /// Remove an entry
    Remove {
        /// Request path to remove
        path: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.store_file {
        config.store_file = path;
    }

    match cli.command {
        Commands::Store { action } => handle_store_action(action, &config).await?,
        Commands::Check { file } => check_file(&file)?,
    }

    Ok(())
}

/// Dispatches store management commands.
async fn handle_store_action(action: StoreAction, config: &Config) -> Result<()> {
    let store = RedirectStore::open(&config.store_file, config.store_open_timeout)
        .await
        .with_context(|| format!("Failed to open store {}", config.store_file.display()))?;

    match action {
        StoreAction::List => list_entries(&store)?,
        StoreAction::Put { path, url } => put_entry(&store, &path, &url)?,
        StoreAction::Remove { path, yes } => remove_entry(&store, &path, yes)?,
    }

    Ok(())
}

/// Lists all store entries in key order.
///
/// # Output Format
///
/// ```text
/// 📋 Store redirects (redirects.redb)
///
///   Path                           Target
///   ──────────────────────────────────────────────────────────────
///   /urlshort-bolt                 https://github.com/bcpoole/urlshort
/// ```
fn list_entries(store: &RedirectStore) -> Result<()> {
    println!(
        "{} ({})",
        "📋 Store redirects".bright_blue().bold(),
        store.path().display()
    );
    println!();

    let entries = store.entries().context("Failed to read store")?;

    if entries.is_empty() {
        println!("{}", "  No entries found".yellow());
        println!();
        println!(
            "  Add one with: {} admin store put /path https://example.com",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {}",
        "Path".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for (path, url) in &entries {
        println!("  {:<30} {}", path.cyan(), url);
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Adds or replaces an entry after validation.
fn put_entry(store: &RedirectStore, path: &str, url: &str) -> Result<()> {
    let previous = store
        .put(path, url)
        .with_context(|| format!("Failed to store redirect for {path}"))?;

    match previous {
        Some(old) => println!(
            "{} {} → {} (was {})",
            "✅ Updated".green().bold(),
            path.cyan(),
            url.bright_white(),
            old.bright_black()
        ),
        None => println!(
            "{} {} → {}",
            "✅ Added".green().bold(),
            path.cyan(),
            url.bright_white()
        ),
    }
    println!("{}", "  Restart the server to apply.".bright_black());

    Ok(())
}

/// Removes an entry with confirmation prompt.
///
/// Requires confirmation (default: No) unless `--yes` is given.
fn remove_entry(store: &RedirectStore, path: &str, skip_confirm: bool) -> Result<()> {
    let entries = store.entries().context("Failed to read store")?;
    let Some((_, url)) = entries.iter().find(|(p, _)| p == path) else {
        println!("{} {}", "⚠️  No entry for".yellow(), path.cyan());
        return Ok(());
    };

    println!("  Path:   {}", path.cyan());
    println!("  Target: {}", url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this redirect?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    store.remove(path).context("Failed to remove entry")?;

    println!("{}", "✅ Redirect removed".green().bold());
    println!("{}", "  Restart the server to apply.".bright_black());

    Ok(())
}

/// Parses a source file the same way the server does at startup.
fn check_file(file: &Path) -> Result<()> {
    println!(
        "{} {}",
        "🔍 Checking".bright_blue(),
        file.display().to_string().bright_white()
    );

    let map = load_file_detect(file).with_context(|| format!("{} is invalid", file.display()))?;

    println!(
        "{} {} redirect(s)",
        "✅ OK:".green().bold(),
        map.len().to_string().bright_white().bold()
    );

    Ok(())
}
