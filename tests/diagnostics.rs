use std::path::{Path, PathBuf};

use gensync::diag::{
    normalize_path, remap, remap_path, Diagnostic, DiagnosticCollector, DiagnosticKind,
    MarkerSeverity,
};
use gensync::exec::parse_diagnostic_line;

#[test]
fn normalize_resolves_dot_segments() {
    assert_eq!(
        normalize_path(Path::new("/t/./apt1/../apt2/Foo.java")),
        PathBuf::from("/t/apt2/Foo.java")
    );
}

#[test]
fn staged_files_map_to_persistent_tree() {
    assert_eq!(
        remap_path(
            Path::new("/t/apt12/com/x/QFoo.java"),
            Path::new("/t/apt12"),
            Path::new("/p/out"),
        ),
        PathBuf::from("/p/out/com/x/QFoo.java")
    );
}

#[test]
fn prefix_match_is_per_component() {
    assert_eq!(
        remap_path(
            Path::new("/t/apt123/Foo.java"),
            Path::new("/t/apt12"),
            Path::new("/p/out"),
        ),
        PathBuf::from("/t/apt123/Foo.java")
    );
}

#[test]
fn remap_drops_unlocated_and_informational_diagnostics() {
    let diagnostics = vec![
        Diagnostic::new(
            DiagnosticKind::Error,
            Some(PathBuf::from("/t/apt1/com/x/QFoo.java")),
            "cannot find symbol",
        )
        .at(12, 7),
        Diagnostic::new(
            DiagnosticKind::MandatoryWarning,
            Some(PathBuf::from("/p/src/com/x/Foo.java")),
            "unchecked",
        )
        .at(3, 1),
        Diagnostic::new(
            DiagnosticKind::Note,
            Some(PathBuf::from("/p/src/com/x/Foo.java")),
            "recompile with -Xlint",
        ),
        Diagnostic::new(DiagnosticKind::Warning, None, "no processor claimed"),
    ];

    let remapped = remap(&diagnostics, Path::new("/t/apt1"), Path::new("/p/out"));

    assert_eq!(remapped.len(), 2);
    assert_eq!(remapped[0].severity, MarkerSeverity::Error);
    assert_eq!(remapped[0].file, PathBuf::from("/p/out/com/x/QFoo.java"));
    assert_eq!((remapped[0].line, remapped[0].column), (12, 7));
    assert_eq!(remapped[1].severity, MarkerSeverity::Warning);
    assert_eq!(remapped[1].file, PathBuf::from("/p/src/com/x/Foo.java"));
    assert_eq!(
        remapped[0].to_string(),
        "/p/out/com/x/QFoo.java:12:7: error: cannot find symbol"
    );
}

#[test]
fn parses_located_diagnostics() {
    let d = parse_diagnostic_line("/t/apt1/com/x/QFoo.java:12: error: cannot find symbol")
        .unwrap();
    assert_eq!(d.kind, DiagnosticKind::Error);
    assert_eq!(d.source, Some(PathBuf::from("/t/apt1/com/x/QFoo.java")));
    assert_eq!((d.line, d.column), (12, 0));
    assert_eq!(d.message, "cannot find symbol");

    let d = parse_diagnostic_line("src/Foo.java:3:9: warning: unchecked call").unwrap();
    assert_eq!(d.kind, DiagnosticKind::Warning);
    assert_eq!((d.line, d.column), (3, 9));
}

#[test]
fn parses_unlocated_diagnostics_and_ignores_other_output() {
    let d = parse_diagnostic_line("warning: No processor claimed any of these annotations")
        .unwrap();
    assert_eq!(d.kind, DiagnosticKind::Warning);
    assert_eq!(d.source, None);

    assert!(parse_diagnostic_line("1 error").is_none());
    assert!(parse_diagnostic_line("    symbol:   class Foo").is_none());
}

#[test]
fn collector_clones_share_one_list() {
    let collector = DiagnosticCollector::new();
    let reporter = collector.clone();

    reporter.report(Diagnostic::new(DiagnosticKind::Error, None, "boom"));

    assert_eq!(collector.len(), 1);
    assert_eq!(collector.diagnostics()[0].message, "boom");
}
