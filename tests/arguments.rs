use std::collections::BTreeMap;
use std::path::PathBuf;

use gensync::exec::{build_arguments, ProcessRequest};

fn request() -> ProcessRequest {
    ProcessRequest {
        files: vec![PathBuf::from("/p/src/A.java"), PathBuf::from("/p/src/B.java")],
        output_dir: PathBuf::from("/t/apt1"),
        processors: "com.x.P1,com.x.P2".to_string(),
        ..ProcessRequest::default()
    }
}

#[test]
fn defaults_in_order_with_files_last() {
    let args = build_arguments(&request());

    assert_eq!(
        args,
        vec![
            "-proc:only",
            "-processor",
            "com.x.P1,com.x.P2",
            "-s",
            "/t/apt1",
            "-nowarn",
            "/p/src/A.java",
            "/p/src/B.java",
        ]
    );
}

#[test]
fn encoding_options_and_sourcepath() {
    let mut req = request();
    req.files.clear();
    req.encoding = Some("UTF-8".to_string());
    req.show_warnings = true;
    req.options = BTreeMap::from([("querydsl.prefix".to_string(), "Q".to_string())]);
    req.source_path = vec![PathBuf::from("/p/src"), PathBuf::from("/p/gen")];

    let args = build_arguments(&req);
    let sep = if cfg!(windows) { ";" } else { ":" };

    assert_eq!(
        args,
        vec![
            "-encoding".to_string(),
            "UTF-8".to_string(),
            "-proc:only".to_string(),
            "-processor".to_string(),
            "com.x.P1,com.x.P2".to_string(),
            "-Aquerydsl.prefix=Q".to_string(),
            "-s".to_string(),
            "/t/apt1".to_string(),
            "-sourcepath".to_string(),
            format!("/p/src{sep}/p/gen"),
        ]
    );
}

#[test]
fn compiler_options_override_in_place_and_blank_values_are_dropped() {
    let mut req = request();
    req.files.clear();
    req.compiler_options = BTreeMap::from([
        ("processor".to_string(), "com.x.Other".to_string()),
        ("g".to_string(), " ".to_string()),
    ]);

    let args = build_arguments(&req);

    assert_eq!(
        args,
        vec!["-proc:only", "-processor", "com.x.Other", "-s", "/t/apt1", "-nowarn", "-g"]
    );
}
