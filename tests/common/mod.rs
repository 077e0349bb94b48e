#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use url_redirect::config::Config;

/// A temporary directory holding source files and the store for one test.
pub struct TestSources {
    pub dir: TempDir,
}

impl TestSources {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("redirects.redb")
    }

    /// Config pointing at this directory, with the given static redirects.
    pub fn config(&self, static_redirects: &[(&str, &str)]) -> Config {
        Config {
            store_file: self.store_path(),
            store_open_timeout: Duration::from_secs(1),
            static_redirects: static_redirects
                .iter()
                .map(|(p, u)| (p.to_string(), u.to_string()))
                .collect(),
            ..Config::default()
        }
    }
}

/// Renders records as a YAML sequence.
pub fn yaml_records(records: &[(&str, &str)]) -> String {
    records
        .iter()
        .map(|(path, url)| format!("- path: {path}\n  url: {url}\n"))
        .collect()
}

/// Renders records as a JSON array.
pub fn json_records(records: &[(&str, &str)]) -> String {
    let items: Vec<serde_json::Value> = records
        .iter()
        .map(|(path, url)| serde_json::json!({ "path": path, "url": url }))
        .collect();
    serde_json::to_string_pretty(&items).unwrap()
}
