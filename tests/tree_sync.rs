mod common;

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use gensync::fs::mock::MockFileSystem;
use gensync::fs::RealFileSystem;
use gensync::sync::reconcile;
use tempfile::TempDir;

use common::{read_tree, tree, write_tree};

fn dirs() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let staging = tmp.path().join("staging");
    let persistent = tmp.path().join("persistent");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&persistent).unwrap();
    (tmp, staging, persistent)
}

fn set_old_mtime(path: &Path) -> SystemTime {
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(stamp)
        .unwrap();
    stamp
}

#[test]
fn full_sync_mirrors_staging_and_removes_stale_files() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(
        &staging,
        &[("inSource", ""), ("inSourceFolder/inSource", "")],
    );
    write_tree(&persistent, &[("inTarget", "")]);

    let report = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert!(persistent.join("inSource").is_file());
    assert!(persistent.join("inSourceFolder/inSource").is_file());
    assert!(!persistent.join("inTarget").exists());
    assert_eq!(report.copied, 2);
    assert_eq!(report.deleted, 1);
    assert_eq!(report.dirs_created, 1);
}

#[test]
fn identical_file_keeps_its_modification_time() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&staging, &[("file", "abc")]);
    write_tree(&persistent, &[("file", "abc")]);
    let stamp = set_old_mtime(&persistent.join("file"));

    let report = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    let modified = fs::metadata(persistent.join("file")).unwrap().modified().unwrap();
    assert_eq!(modified, stamp);
    assert_eq!(report.unchanged, 1);
    assert!(report.is_noop());
}

#[test]
fn same_length_different_content_is_replaced() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&staging, &[("Q.java", "abc")]);
    write_tree(&persistent, &[("Q.java", "abd")]);

    let report = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert_eq!(read_tree(&persistent), tree(&[("Q.java", "abc")]));
    assert_eq!(report.copied, 1);
}

#[test]
fn full_sync_removes_nested_stale_files_and_directories() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(
        &staging,
        &[
            ("com/mysema/querydsl/Query.java", "abc"),
            ("com/mysema/Entity.java", "def"),
        ],
    );
    write_tree(
        &persistent,
        &[
            ("com/mysema/querydsl/OldQuery.java", "ghi"),
            ("com/mysema/querydsl/support/Example.java", "jkl"),
        ],
    );

    reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert!(!persistent.join("com/mysema/querydsl/support").exists());
    assert_eq!(
        read_tree(&persistent),
        tree(&[
            ("com/mysema/Entity.java", "def"),
            ("com/mysema/querydsl/Query.java", "abc"),
        ])
    );
}

#[test]
fn full_sync_touches_only_what_changed() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&staging, &[("a/Q1.java", "q1"), ("a/Q2.java", "q2-new")]);
    write_tree(
        &persistent,
        &[("a/Q1.java", "q1"), ("a/Q2.java", "q2"), ("a/OldQ.java", "old")],
    );
    let stamp = set_old_mtime(&persistent.join("a/Q1.java"));

    let report = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert_eq!(
        read_tree(&persistent),
        tree(&[("a/Q1.java", "q1"), ("a/Q2.java", "q2-new")])
    );
    let modified = fs::metadata(persistent.join("a/Q1.java"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(modified, stamp);
    assert_eq!(report.copied, 1);
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.deleted, 1);
}

#[test]
fn incremental_sync_never_deletes() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&staging, &[("a/Q2.java", "q2-new")]);
    write_tree(&persistent, &[("a/Q1.java", "q1"), ("a/Q2.java", "q2")]);

    let report = reconcile(&RealFileSystem, true, &staging, &persistent).unwrap();

    assert_eq!(
        read_tree(&persistent),
        tree(&[("a/Q1.java", "q1"), ("a/Q2.java", "q2-new")])
    );
    assert_eq!(report.deleted, 0);
}

#[test]
fn empty_staging_empties_persistent_only_in_full_mode() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&persistent, &[("a/Q1.java", "q1")]);

    reconcile(&RealFileSystem, true, &staging, &persistent).unwrap();
    assert_eq!(read_tree(&persistent), tree(&[("a/Q1.java", "q1")]));

    reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();
    assert!(read_tree(&persistent).is_empty());
    assert!(persistent.is_dir());
}

#[test]
fn missing_persistent_directory_is_created() {
    let (tmp, staging, _) = dirs();
    let persistent = tmp.path().join("not/yet/there");
    write_tree(&staging, &[("pkg/Gen.java", "gen")]);

    let report = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert_eq!(read_tree(&persistent), tree(&[("pkg/Gen.java", "gen")]));
    assert_eq!(report.dirs_created, 2);
}

#[test]
fn kind_mismatch_is_replaced_in_both_directions() {
    let (_tmp, staging, persistent) = dirs();
    write_tree(&staging, &[("was_file/Gen.java", "gen"), ("was_dir", "now a file")]);
    write_tree(&persistent, &[("was_file", "file"), ("was_dir/Old.java", "old")]);

    reconcile(&RealFileSystem, true, &staging, &persistent).unwrap();

    assert_eq!(
        read_tree(&persistent),
        tree(&[("was_dir", "now a file"), ("was_file/Gen.java", "gen")])
    );
}

#[test]
fn reconciling_identical_output_twice_changes_nothing() {
    let (_tmp, staging, persistent) = dirs();
    let files = [("a/Q1.java", "q1"), ("a/b/Q2.java", "q2")];

    write_tree(&staging, &files);
    reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    write_tree(&staging, &files);
    let second = reconcile(&RealFileSystem, false, &staging, &persistent).unwrap();

    assert!(second.is_noop());
    assert_eq!(second.unchanged, 2);
    assert_eq!(read_tree(&persistent), tree(&files));
}

#[test]
fn failed_rename_falls_back_to_copy() {
    let fs = MockFileSystem::new();
    fs.add_file("/stage/pkg/Gen.java", "gen");
    fs.add_dir("/out");
    fs.set_rename_fails(true);

    let report = reconcile(&fs, false, Path::new("/stage"), Path::new("/out")).unwrap();

    assert_eq!(fs.contents("/out/pkg/Gen.java"), Some(b"gen".to_vec()));
    assert_eq!(fs.contents("/stage/pkg/Gen.java"), None);
    assert_eq!(report.copied, 1);
}
