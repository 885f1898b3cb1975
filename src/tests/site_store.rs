use crate::dashboard::Dashboard;
use crate::site::SiteStore;
use crate::storage::{BackendLocal, StorageManager};

fn fresh_store() -> (SiteStore<BackendLocal>, BackendLocal, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let backend = BackendLocal::new(tmp.path().to_str().unwrap()).unwrap();
    (SiteStore::new(backend.clone(), "sites.json"), backend, tmp)
}

#[test]
fn test_load_missing_is_empty() {
    let (store, _, _tmp) = fresh_store();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_skips_incomplete_records() {
    let (store, backend, _tmp) = fresh_store();
    let json = r#"[
        {"name": "Ok", "url": "https://ok.dev", "tags": ["a"]},
        {"name": "", "url": "https://nameless.dev"},
        {"name": "No url", "url": ""}
    ]"#;
    backend.write("sites.json", json.as_bytes()).unwrap();

    let sites = store.load().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].name, "Ok");
}

#[test]
fn test_load_skips_records_missing_keys() {
    let (store, backend, _tmp) = fresh_store();
    let json = r#"[
        {"name": "Ok", "url": "https://ok.dev"},
        {"url": "https://nameless.dev"},
        {"name": "No url"}
    ]"#;
    backend.write("sites.json", json.as_bytes()).unwrap();

    let sites = store.load().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].name, "Ok");
}

#[test]
fn test_load_keeps_sites_with_foreign_fields() {
    let (store, backend, _tmp) = fresh_store();
    let json = r#"[
        {"name": "Ok", "url": "https://ok.dev", "id": 7},
        {"name": "Bad", "url": "https://bad.dev", "tags": "not-a-list"},
        {"name": "Also ok", "url": "https://also.dev", "group": "g"}
    ]"#;
    backend.write("sites.json", json.as_bytes()).unwrap();

    let sites = store.load().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].extra.get("id").map(String::as_str), Some("7"));
    assert_eq!(sites[1].group(), Some("g"));
}

#[test]
fn test_load_malformed_fails() {
    let (store, backend, _tmp) = fresh_store();
    backend.write("sites.json", b"{not json").unwrap();
    assert!(store.load().is_err());
}

#[test]
fn test_save_text_and_reload() {
    let (store, _, _tmp) = fresh_store();

    let mut dash = Dashboard::new(store.load().unwrap());
    dash.save_text(
        "```yaml
group: ai
name: Tool X
url: https://tool-x.dev
links:
  - text: Docs
    url: https://tool-x.dev/docs
tags:
  - ai
```",
    )
    .unwrap();
    store.save(dash.sites()).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, dash.sites());
    assert_eq!(reloaded[0].group(), Some("ai"));
    assert_eq!(reloaded[0].links[0].url, "https://tool-x.dev/docs");
}
