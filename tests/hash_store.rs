use std::collections::BTreeMap;
use std::path::PathBuf;

use gensync::fs::mock::MockFileSystem;
use gensync::scan::{compute_file_hash, FileHashStore, HashStore, HASH_FILE_NAME};
use tempfile::TempDir;

#[test]
fn blake3_hash_of_mock_file() {
    let fs = MockFileSystem::new();
    fs.add_file("test.txt", b"hello world".to_vec());

    let hash = compute_file_hash(&fs, &PathBuf::from("test.txt")).unwrap();
    assert_eq!(
        hash,
        "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
    );
}

#[test]
fn missing_hash_file_is_an_empty_baseline() {
    let tmp = TempDir::new().unwrap();
    let store = FileHashStore::new(tmp.path().join("state"));

    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn file_store_round_trips_paths_with_spaces() {
    let tmp = TempDir::new().unwrap();
    let state = tmp.path().join("state");

    let mut hashes = BTreeMap::new();
    hashes.insert(PathBuf::from("/p/src/My File.java"), "abc123".to_string());
    hashes.insert(PathBuf::from("/p/src/Other.java"), "def456".to_string());

    let mut store = FileHashStore::new(state.clone());
    store.store_all(&hashes).unwrap();
    assert!(state.join(HASH_FILE_NAME).is_file());

    let reloaded = FileHashStore::new(state).load_all().unwrap();
    assert_eq!(reloaded, hashes);
}
