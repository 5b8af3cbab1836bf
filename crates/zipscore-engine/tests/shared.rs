//! Integration tests for the shared engine handle.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use zipscore_engine::{EngineError, LocationEngine, SharedEngine};
use zipscore_ingest::IngestError;
use zipscore_model::{Higher, ScoringConfig};

const HEADER: &str = "ZIP,California County,PM2.5 Pctl,Diesel PM Pctl,Asthma Pctl,Poverty Pctl,Unemployment Pctl,Traffic Pctl";

fn write_dataset(path: &Path, rows: &[&str]) {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

#[test]
fn reload_swaps_dataset_for_new_snapshots() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cali_dataset.csv");
    write_dataset(&path, &["90012,Los Angeles,80,60,50,40,20,30"]);

    let shared = SharedEngine::new(&path, ScoringConfig::default()).unwrap();
    let before = shared.snapshot();
    assert_eq!(before.score_code("90012").unwrap().score.value, 5.2);
    assert!(before.score_code("90210").is_err());

    write_dataset(
        &path,
        &[
            "90012,Los Angeles,0,0,0,0,0,0",
            "90210,Los Angeles,40,20,10,10,10,60",
        ],
    );
    let reloaded = shared.reload().unwrap();

    // Old snapshot is unchanged.
    assert_eq!(before.score_code("90012").unwrap().score.value, 5.2);
    assert!(before.score_code("90210").is_err());

    // New snapshots see the new table.
    let after = shared.snapshot();
    assert!(Arc::ptr_eq(&after, &reloaded));
    assert_eq!(after.score_code("90012").unwrap().score.value, 10.0);
    assert_eq!(after.compare("90012", "90210").unwrap().higher, Higher::A);
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cali_dataset.csv");
    write_dataset(&path, &["90012,Los Angeles,80,60,50,40,20,30"]);

    let shared = SharedEngine::new(&path, ScoringConfig::default()).unwrap();
    let before = shared.snapshot();

    fs::write(&path, "ZIP,Asthma Pctl\n90012,50\n").unwrap();
    let err = shared.reload().unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ingest(IngestError::RequiredHeaderMissing { .. })
    ));
    assert!(Arc::ptr_eq(&before, &shared.snapshot()));

    fs::remove_file(&path).unwrap();
    let err = shared.reload().unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ingest(IngestError::ResourceNotFound { .. })
    ));
    assert_eq!(shared.snapshot().score_code("90012").unwrap().score.value, 5.2);
}

#[test]
fn missing_dataset_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");
    let err = SharedEngine::new(&path, ScoringConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ingest(IngestError::ResourceNotFound { .. })
    ));
}

#[test]
fn snapshots_are_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cali_dataset.csv");
    write_dataset(
        &path,
        &[
            "90012,Los Angeles,80,60,50,40,20,30",
            "90210,Los Angeles,40,20,10,10,10,60",
        ],
    );
    let shared = Arc::new(SharedEngine::new(&path, ScoringConfig::default()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.snapshot().compare("90012", "90210").unwrap().higher)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Higher::B);
    }
}

#[test]
fn replace_returns_previous_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cali_dataset.csv");
    write_dataset(&path, &["90012,Los Angeles,80,60,50,40,20,30"]);
    let shared = SharedEngine::new(&path, ScoringConfig::default()).unwrap();
    let first = shared.snapshot();

    let replacement = Arc::new(LocationEngine::load(&path, ScoringConfig::default()).unwrap());
    let previous = shared.replace(Arc::clone(&replacement));

    assert!(Arc::ptr_eq(&previous, &first));
    assert!(Arc::ptr_eq(&shared.snapshot(), &replacement));
}
