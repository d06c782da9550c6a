use std::path::{Path, PathBuf};

use gensync::fs::mock::MockFileSystem;
use gensync::scan::{collect_matching_files, effective_patterns, IncludeFilter};

fn includes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_includes_become_catch_all() {
    assert_eq!(effective_patterns(&[], "java"), vec!["**/*.java"]);
}

#[test]
fn dotted_packages_become_path_patterns() {
    assert_eq!(
        effective_patterns(&includes(&["com.example.**.bo.**", "org.acme"]), "java"),
        vec!["com/example/**/bo/**/*.java", "org/acme/*.java"]
    );
}

#[test]
fn single_star_does_not_cross_directories() {
    let filter = IncludeFilter::new(&includes(&["com.example"]), "java").unwrap();

    assert!(filter.matches("com/example/Foo.java"));
    assert!(!filter.matches("com/example/sub/Foo.java"));
    assert!(!filter.matches("com/example/Foo.kt"));
}

#[test]
fn double_star_spans_packages() {
    let filter = IncludeFilter::new(&includes(&["com.example.**.bo.**"]), "java").unwrap();

    assert!(filter.matches("com/example/bo/Foo.java"));
    assert!(filter.matches("com/example/a/b/bo/c/Foo.java"));
    assert!(!filter.matches("com/other/bo/Foo.java"));
}

#[test]
fn matches_under_requires_the_root_prefix() {
    let filter = IncludeFilter::new(&[], "java").unwrap();

    assert!(filter.matches_under(Path::new("/p/src"), Path::new("/p/src/a/Foo.java")));
    assert!(!filter.matches_under(Path::new("/p/src"), Path::new("/p/other/Foo.java")));
}

#[test]
fn collect_walks_nested_directories() {
    let fs = MockFileSystem::new();
    fs.add_file("/p/src/com/example/A.java", "a");
    fs.add_file("/p/src/com/example/deep/B.java", "b");
    fs.add_file("/p/src/com/example/notes.txt", "n");
    fs.add_file("/p/src/org/C.java", "c");

    let filter = IncludeFilter::new(&includes(&["com.example.**"]), "java").unwrap();
    let mut files = collect_matching_files(&fs, Path::new("/p/src"), &filter).unwrap();
    files.sort();

    assert_eq!(
        files,
        vec![
            PathBuf::from("/p/src/com/example/A.java"),
            PathBuf::from("/p/src/com/example/deep/B.java"),
        ]
    );
}
