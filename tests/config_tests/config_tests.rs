//! Config Tests
//!
//! Tests for defaults, the builder, and validation.

use std::fs;

use storebench::backend::{BackendKind, LogStoreAdapter, ReadOrder, StorageBackend};
use storebench::codec::ItemCodec;
use storebench::{BenchError, Config, ReportFormat, WorkloadMode};
use tempfile::TempDir;

// =============================================================================
// Defaults and Builder Tests
// =============================================================================

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.record_count, 100_000);
    assert_eq!(config.seed, 0);
    assert_eq!(
        config.workloads,
        vec![WorkloadMode::SequentialIntegers, WorkloadMode::StructuredRandom]
    );
    assert_eq!(config.backends, vec![BackendKind::Relational, BackendKind::LogStore]);
    assert_eq!(config.item_codec, ItemCodec::Json);
    assert_eq!(config.read_order, ReadOrder::FirstWrite);
    assert_eq!(config.report_format, ReportFormat::Text);
    assert!(config.verify_values);
    assert!(config.reset);
    config.validate().unwrap();
}

#[test]
fn test_backend_paths_derive_from_data_dir() {
    let config = Config::builder().data_dir("/tmp/bench").build();

    assert_eq!(
        config.backend_path(BackendKind::LogStore),
        std::path::Path::new("/tmp/bench/logstore")
    );
    assert_eq!(
        config.backend_path(BackendKind::Relational),
        std::path::Path::new("/tmp/bench/relational")
    );
}

#[test]
fn test_backend_path_overrides() {
    let config = Config::builder()
        .data_dir("/tmp/bench")
        .logstore_path("/mnt/fast/lsm")
        .relational_path("/mnt/slow/sql")
        .build();

    assert_eq!(
        config.backend_path(BackendKind::LogStore),
        std::path::Path::new("/mnt/fast/lsm")
    );
    assert_eq!(
        config.backend_path(BackendKind::Relational),
        std::path::Path::new("/mnt/slow/sql")
    );
}

// =============================================================================
// Validation Tests
// =============================================================================

fn assert_config_error(config: &Config) {
    match config.validate() {
        Err(BenchError::Config(_)) => {}
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_zero_record_count_rejected() {
    assert_config_error(&Config::builder().record_count(0).build());
}

#[test]
fn test_empty_selections_rejected() {
    assert_config_error(&Config::builder().workloads(Vec::new()).build());
    assert_config_error(&Config::builder().backends(Vec::new()).build());
}

#[test]
fn test_duplicate_selections_rejected() {
    assert_config_error(
        &Config::builder()
            .backends(vec![BackendKind::LogStore, BackendKind::LogStore])
            .build(),
    );
    assert_config_error(
        &Config::builder()
            .workloads(vec![WorkloadMode::StructuredRandom, WorkloadMode::StructuredRandom])
            .build(),
    );
}

#[test]
fn test_shared_backend_directory_rejected() {
    assert_config_error(
        &Config::builder()
            .logstore_path("/tmp/same")
            .relational_path("/tmp/same")
            .build(),
    );
}

#[test]
fn test_equivalent_relative_paths_rejected() {
    assert_config_error(
        &Config::builder()
            .logstore_path("./same")
            .relational_path("same")
            .build(),
    );
    assert_config_error(
        &Config::builder()
            .logstore_path("a/../same")
            .relational_path("same/.")
            .build(),
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_backend_directory_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real");
    let alias = temp_dir.path().join("alias");
    fs::create_dir_all(&real).unwrap();
    std::os::unix::fs::symlink(&real, &alias).unwrap();

    assert_config_error(
        &Config::builder()
            .logstore_path(&real)
            .relational_path(&alias)
            .build(),
    );
}

// =============================================================================
// Directory Preparation Tests
// =============================================================================

#[test]
fn test_prepare_creates_backend_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp_dir.path().join("data")).build();

    config.prepare_dirs().unwrap();

    assert!(config.backend_path(BackendKind::LogStore).is_dir());
    assert!(config.backend_path(BackendKind::Relational).is_dir());
}

#[test]
fn test_prepare_reset_removes_only_relational_files() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(home.join("docs")).unwrap();
    fs::write(home.join("docs").join("thesis.txt"), b"keep me").unwrap();
    fs::write(home.join("notes.txt"), b"keep me too").unwrap();
    fs::write(home.join("kv.sqlite"), b"stale").unwrap();
    fs::write(home.join("kv.sqlite-journal"), b"stale").unwrap();

    let config = Config::builder()
        .data_dir(temp_dir.path().join("data"))
        .relational_path(&home)
        .backends(vec![BackendKind::Relational])
        .build();
    config.prepare_dirs().unwrap();

    assert!(home.is_dir());
    assert!(home.join("docs").join("thesis.txt").exists());
    assert!(home.join("notes.txt").exists());
    assert!(!home.join("kv.sqlite").exists());
    assert!(!home.join("kv.sqlite-journal").exists());
}

#[test]
fn test_prepare_reset_refuses_foreign_logstore_dir() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("thesis.txt"), b"keep me").unwrap();

    let config = Config::builder()
        .data_dir(temp_dir.path().join("data"))
        .logstore_path(&home)
        .backends(vec![BackendKind::LogStore])
        .build();

    match config.prepare_dirs() {
        Err(BenchError::Config(msg)) => assert!(msg.contains("refusing to reset")),
        other => panic!("Expected configuration error, got {:?}", other),
    }
    assert!(home.join("thesis.txt").exists());
}

#[test]
fn test_prepare_reset_accepts_empty_logstore_dir() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let config = Config::builder()
        .data_dir(temp_dir.path().join("data"))
        .logstore_path(&empty)
        .backends(vec![BackendKind::LogStore])
        .build();

    config.prepare_dirs().unwrap();
    assert!(empty.is_dir());
}

#[test]
fn test_prepare_reset_clears_previous_logstore() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .backends(vec![BackendKind::LogStore])
        .build();
    let path = config.backend_path(BackendKind::LogStore);

    {
        let mut store = LogStoreAdapter::open(&path).unwrap();
        store.put(b"stale", b"value").unwrap();
        store.persist().unwrap();
    }

    config.prepare_dirs().unwrap();

    assert!(path.is_dir());
    let mut store = LogStoreAdapter::open(&path).unwrap();
    assert_eq!(store.get(b"stale").unwrap(), None);
}

#[test]
fn test_prepare_keeps_existing_files_without_reset() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp_dir.path()).reset(false).build();
    let kept = config.backend_path(BackendKind::Relational).join("kept");
    fs::create_dir_all(kept.parent().unwrap()).unwrap();
    fs::write(&kept, b"old").unwrap();

    config.prepare_dirs().unwrap();

    assert!(kept.exists());
}

#[test]
fn test_prepare_rejects_unwritable_path() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("not-a-dir");
    fs::write(&file, b"").unwrap();
    let config = Config::builder().data_dir(&file).build();

    match config.prepare_dirs() {
        Err(BenchError::Config(msg)) => assert!(msg.contains("not writable")),
        other => panic!("Expected configuration error, got {:?}", other),
    }
}
