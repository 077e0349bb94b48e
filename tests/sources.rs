mod common;

use common::{TestSources, json_records, yaml_records};
use url_redirect::RedirectError;
use url_redirect::application::load_sources;
use url_redirect::infrastructure::files::{SourceFormat, load_file, load_file_detect};

fn numbered_records(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("/r{i}"), format!("https://example.com/{i}")))
        .collect()
}

fn as_refs(records: &[(String, String)]) -> Vec<(&str, &str)> {
    records
        .iter()
        .map(|(p, u)| (p.as_str(), u.as_str()))
        .collect()
}

#[test]
fn test_yaml_file_yields_every_record() {
    let sources = TestSources::new();
    let records = numbered_records(25);
    let path = sources.write("urls.yaml", &yaml_records(&as_refs(&records)));

    let map = load_file(&path, SourceFormat::Yaml).unwrap();

    assert_eq!(map.len(), 25);
    for (p, u) in &records {
        assert_eq!(map.get(p).unwrap().as_str(), u);
    }
}

#[test]
fn test_json_file_yields_every_record() {
    let sources = TestSources::new();
    let records = numbered_records(25);
    let path = sources.write("urls.json", &json_records(&as_refs(&records)));

    let map = load_file(&path, SourceFormat::Json).unwrap();

    assert_eq!(map.len(), 25);
    for (p, u) in &records {
        assert_eq!(map.get(p).unwrap().as_str(), u);
    }
}

#[test]
fn test_duplicate_paths_keep_last_url() {
    let sources = TestSources::new();
    let path = sources.write(
        "urls.yaml",
        &yaml_records(&[
            ("/dup", "https://first.example"),
            ("/other", "https://other.example"),
            ("/dup", "https://last.example"),
        ]),
    );

    let map = load_file_detect(&path).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("/dup").unwrap().as_str(), "https://last.example");
}

#[test]
fn test_malformed_yaml_fails() {
    let sources = TestSources::new();
    let path = sources.write("urls.yaml", "- path: /a\n  url: https://a.example\n- [broken");

    let result = load_file(&path, SourceFormat::Yaml);

    assert!(matches!(result, Err(RedirectError::Yaml(_))));
}

#[test]
fn test_malformed_json_fails() {
    let sources = TestSources::new();
    let path = sources.write("urls.json", r#"[{"path": "/a", "url": "https://a.example"},"#);

    let result = load_file(&path, SourceFormat::Json);

    assert!(matches!(result, Err(RedirectError::Json(_))));
}

#[tokio::test]
async fn test_malformed_source_aborts_startup() {
    let sources = TestSources::new();
    let yaml = sources.write("urls.yaml", &yaml_records(&[("/a", "https://a.example")]));
    let json = sources.write("urls.json", "{ not json");
    let mut config = sources.config(&[]);
    config.yaml_file = Some(yaml);
    config.json_file = Some(json);

    let result = load_sources(&config).await;

    assert!(matches!(result, Err(RedirectError::Json(_))));
}

#[tokio::test]
async fn test_empty_json_file_aborts_startup() {
    let sources = TestSources::new();
    let json = sources.write("urls.json", "");
    let mut config = sources.config(&[]);
    config.json_file = Some(json);

    let result = load_sources(&config).await;

    assert!(matches!(result, Err(RedirectError::Json(_))));
}

#[tokio::test]
async fn test_missing_file_aborts_startup() {
    let sources = TestSources::new();
    let mut config = sources.config(&[]);
    config.yaml_file = Some(sources.dir.path().join("missing.yaml"));

    let result = load_sources(&config).await;

    assert!(matches!(result, Err(RedirectError::Io { .. })));
}

#[tokio::test]
async fn test_record_missing_field_aborts_startup() {
    let sources = TestSources::new();
    let json = sources.write(
        "urls.json",
        r#"[{"path": "/a", "url": "https://a.example"}, {"url": "https://b.example"}]"#,
    );
    let mut config = sources.config(&[]);
    config.json_file = Some(json);

    let result = load_sources(&config).await;

    assert!(matches!(
        result,
        Err(RedirectError::MissingField {
            index: 1,
            field: "path"
        })
    ));
}

#[tokio::test]
async fn test_unset_files_are_empty_sources() {
    let sources = TestSources::new();
    let config = sources.config(&[("/a", "https://a.example")]);

    let loaded = load_sources(&config).await.unwrap();

    assert_eq!(loaded.static_map.len(), 1);
    assert_eq!(loaded.store.len(), 1);
    assert!(loaded.yaml.is_empty());
    assert!(loaded.json.is_empty());
}

#[tokio::test]
async fn test_invalid_static_redirect_aborts_startup() {
    let sources = TestSources::new();
    let config = sources.config(&[("/a", "mailto:someone@example.com")]);

    let result = load_sources(&config).await;

    assert!(matches!(result, Err(RedirectError::InvalidUrl { .. })));
}
