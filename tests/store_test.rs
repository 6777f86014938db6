use deckgen::artifacts::ArtifactStore;
use std::path::Path;

#[test]
fn keyed_put_replaces_and_moves_most_recent() {
    let mut store = ArtifactStore::new();
    store.put(Some(1), "/tmp/a.png");
    store.put(Some(1), "/tmp/b.png");

    assert_eq!(store.get(1), Some(Path::new("/tmp/b.png")));
    assert_eq!(store.most_recent(), Some(Path::new("/tmp/b.png")));
}

#[test]
fn unkeyed_put_only_moves_most_recent() {
    let mut store = ArtifactStore::new();
    store.put(Some(1), "/tmp/a.png");
    store.put(None, "/tmp/b.png");

    assert_eq!(store.get(1), Some(Path::new("/tmp/a.png")));
    assert_eq!(store.most_recent(), Some(Path::new("/tmp/b.png")));
}

#[test]
fn all_unique_dedupes_in_first_seen_order() {
    let mut store = ArtifactStore::new();
    store.put(Some(1), "/tmp/a.png");
    store.put(Some(2), "/tmp/b.png");
    store.put(Some(3), "/tmp/a.png");
    store.put(Some(4), "/tmp/c.png");

    let unique: Vec<_> = store.all_unique().iter().map(|p| p.as_path()).collect();
    assert_eq!(
        unique,
        vec![
            Path::new("/tmp/a.png"),
            Path::new("/tmp/b.png"),
            Path::new("/tmp/c.png"),
        ]
    );
}

#[test]
fn empty_store_answers_none() {
    let store = ArtifactStore::new();
    assert!(store.get(7).is_none());
    assert!(store.most_recent().is_none());
    assert!(store.all_unique().is_empty());
}
