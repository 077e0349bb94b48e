//! Startup loading of every redirect source.

use tracing::info;

use crate::config::Config;
use crate::domain::{RedirectMap, RedirectSource};
use crate::error::Result;
use crate::infrastructure::files::{SourceFormat, load_file};
use crate::infrastructure::store::load_store;

/// The fully materialized maps of all four sources.
///
/// Built once before the server starts and moved into the handler chain.
#[derive(Debug, Clone, Default)]
pub struct RedirectSources {
    pub static_map: RedirectMap,
    pub store: RedirectMap,
    pub yaml: RedirectMap,
    pub json: RedirectMap,
}

/// Loads every source described by `config`.
///
/// Runs sequentially: static map, store, YAML file, JSON file. A source
/// without a configured file is empty.
///
/// # Errors
///
/// The first failing source aborts loading.
pub async fn load_sources(config: &Config) -> Result<RedirectSources> {
    let static_map = RedirectMap::from_pairs(config.static_redirects.iter().cloned())?;
    log_loaded(RedirectSource::Static, &static_map);

    let store = load_store(&config.store_file, config.store_open_timeout).await?;
    log_loaded(RedirectSource::Store, &store);

    let yaml = match &config.yaml_file {
        Some(path) => load_file(path, SourceFormat::Yaml)?,
        None => RedirectMap::new(),
    };
    log_loaded(RedirectSource::Yaml, &yaml);

    let json = match &config.json_file {
        Some(path) => load_file(path, SourceFormat::Json)?,
        None => RedirectMap::new(),
    };
    log_loaded(RedirectSource::Json, &json);

    Ok(RedirectSources {
        static_map,
        store,
        yaml,
        json,
    })
}

fn log_loaded(source: RedirectSource, map: &RedirectMap) {
    info!(source = %source, entries = map.len(), "Redirect source loaded");
}
