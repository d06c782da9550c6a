use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gensync::diag::{Diagnostic, DiagnosticKind};
use gensync::exec::ProcessRequest;
use gensync::fs::mock::MockFileSystem;
use gensync::fs::FileSystem;
use gensync::scan::FileSet;
use gensync::stage::{StagingDir, StagingInvoker, STAGING_PREFIX};
use gensync_test_utils::fake_processor::{FakeProcessor, Outcome};
use gensync_test_utils::init_tracing;

fn shared(fs: &MockFileSystem) -> Arc<dyn FileSystem> {
    Arc::new(fs.clone())
}

fn files() -> FileSet {
    BTreeSet::from([PathBuf::from("/p/src/A.java")])
}

#[test]
fn staging_directories_are_unique_and_prefixed() {
    let fs = MockFileSystem::new();

    let first = StagingDir::create(shared(&fs), Path::new("/scratch")).unwrap();
    let second = StagingDir::create(shared(&fs), Path::new("/scratch")).unwrap();

    assert_ne!(first.path(), second.path());
    for dir in [&first, &second] {
        let name = dir.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(STAGING_PREFIX));
        assert!(name[STAGING_PREFIX.len()..].parse::<u64>().is_ok());
        assert!(fs.is_dir(dir.path()));
    }
}

#[test]
fn staging_directory_is_removed_on_close_and_on_drop() {
    let fs = MockFileSystem::new();

    let closed = StagingDir::create(shared(&fs), Path::new("/scratch")).unwrap();
    let closed_path = closed.path().to_path_buf();
    fs.add_file(closed_path.join("pkg/Gen.java"), "gen");
    closed.close().unwrap();
    assert!(!fs.exists(&closed_path));

    let dropped_path = {
        let dropped = StagingDir::create(shared(&fs), Path::new("/scratch")).unwrap();
        dropped.path().to_path_buf()
    };
    assert!(!fs.exists(&dropped_path));
    assert!(fs.list("/scratch").is_empty());
}

#[tokio::test]
async fn invoker_points_the_processor_at_staging() {
    init_tracing();
    let fs = MockFileSystem::new();
    let processor = FakeProcessor::new(shared(&fs)).writes("pkg/QA.java", "generated");
    let requests = processor.requests();
    let invoker = StagingInvoker::new(shared(&fs), Arc::new(processor));

    let invocation = invoker
        .invoke(&files(), ProcessRequest::default(), Path::new("/scratch"))
        .await
        .unwrap();

    assert!(invocation.succeeded);
    assert!(invocation.failure.is_none());
    let request = requests.lock().unwrap()[0].clone();
    assert_eq!(request.output_dir, invocation.staging.path());
    assert_eq!(request.files, vec![PathBuf::from("/p/src/A.java")]);
    assert_eq!(
        fs.contents(invocation.staging.path().join("pkg/QA.java")),
        Some(b"generated".to_vec())
    );
}

#[tokio::test]
async fn failures_keep_staged_output_and_diagnostics() {
    init_tracing();
    for outcome in [Outcome::Fail, Outcome::Error, Outcome::Panic] {
        let fs = MockFileSystem::new();
        let processor = FakeProcessor::new(shared(&fs))
            .writes("pkg/QA.java", "partial")
            .reports(
                Diagnostic::new(DiagnosticKind::Error, None, "broken").at(1, 1),
                Some("pkg/QA.java"),
            )
            .ends_with(outcome);
        let invoker = StagingInvoker::new(shared(&fs), Arc::new(processor));

        let invocation = invoker
            .invoke(&files(), ProcessRequest::default(), Path::new("/scratch"))
            .await
            .unwrap();

        assert!(!invocation.succeeded, "{outcome:?} should fail");
        assert!(invocation.failure.is_some());
        assert_eq!(invocation.diagnostics.len(), 1);
        assert!(fs.is_file(&invocation.staging.path().join("pkg/QA.java")));
    }
}
