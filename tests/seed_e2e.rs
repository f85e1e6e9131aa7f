//! Seed loading against files and a mock HTTP server.

use std::sync::Arc;
use std::time::Duration;

use contactes::{
    InMemoryKeyValueStore, KeyValueStore, SeedLoader, SeedOutcome, SeedSource, StorageAdapter,
    STORAGE_KEY,
};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED: &str = r#"[
    {"id":1,"nom":"Ana","email":"ana@x.com","telefon":"600"},
    {"id":5,"nom":"Ben","email":"ben@x.com","telefon":"700"}
]"#;

fn empty_adapter() -> (StorageAdapter, Arc<InMemoryKeyValueStore>) {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    (StorageAdapter::new(kv.clone()), kv)
}

async fn mock_seed(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts.json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn http_seed_populates_empty_storage() {
    let server = mock_seed(200, SEED).await;
    let (adapter, _) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::parse(&format!("{}/contacts.json", server.uri())));
    assert_eq!(loader.run(&adapter).await, SeedOutcome::Seeded(2));

    let contacts = adapter.load();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1].id.get(), 5);
    assert_eq!(contacts[1].name, "Ben");
}

#[tokio::test]
async fn http_seed_not_found_leaves_storage_empty() {
    let server = mock_seed(404, "missing").await;
    let (adapter, kv) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::Url(format!("{}/contacts.json", server.uri())));
    let outcome = loader.run(&adapter).await;
    assert!(matches!(&outcome, SeedOutcome::Failed(reason) if reason.contains("404")));
    assert_eq!(kv.get_item(STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn malformed_http_seed_leaves_storage_empty() {
    let server = mock_seed(200, "{\"not\": \"a list\"}").await;
    let (adapter, kv) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::Url(format!("{}/contacts.json", server.uri())));
    assert!(matches!(loader.run(&adapter).await, SeedOutcome::Failed(_)));
    assert_eq!(kv.get_item(STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn slow_http_seed_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SEED)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let (adapter, kv) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::Url(format!("{}/contacts.json", server.uri())))
        .with_timeout(Some(Duration::from_millis(200)));
    assert!(matches!(loader.run(&adapter).await, SeedOutcome::Failed(_)));
    assert_eq!(kv.get_item(STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn existing_collection_is_never_overwritten() {
    let server = mock_seed(200, SEED).await;
    let (adapter, kv) = empty_adapter();
    kv.set_item(STORAGE_KEY, "[]").unwrap();

    let loader = SeedLoader::new(SeedSource::Url(format!("{}/contacts.json", server.uri())));
    assert_eq!(loader.run(&adapter).await, SeedOutcome::AlreadyInitialized);
    assert_eq!(kv.get_item(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn file_seed_populates_empty_storage() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("contacts.json");
    std::fs::write(&file, SEED).unwrap();
    let (adapter, _) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::File(file));
    assert_eq!(loader.run(&adapter).await, SeedOutcome::Seeded(2));
    assert_eq!(adapter.load().len(), 2);
}

#[tokio::test]
async fn missing_seed_file_fails_without_writing() {
    let dir = tempdir().unwrap();
    let (adapter, kv) = empty_adapter();

    let loader = SeedLoader::new(SeedSource::File(dir.path().join("nope.json")));
    let outcome = loader.run(&adapter).await;
    assert!(matches!(&outcome, SeedOutcome::Failed(reason) if reason.contains("nope.json")));
    assert!(kv.is_empty().unwrap());
}
