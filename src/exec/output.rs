// src/exec/output.rs

//! Parsing diagnostics out of tool output.
//!
//! Recognised shapes (javac / gcc style):
//!
//! ```text
//! src/com/example/Foo.java:12: error: cannot find symbol
//! src/com/example/Foo.java:12:7: warning: unchecked call
//! warning: No processor claimed any of these annotations
//! ```

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::diag::{Diagnostic, DiagnosticKind};

const KINDS: &str = r"error|fatal error|warning|mandatory warning|note";

static LOCATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<file>.+?):(?P<line>\d+):(?:(?P<col>\d+):)?\s*(?P<kind>{KINDS}):\s*(?P<msg>.*)$"
    ))
    .expect("diagnostic pattern is valid")
});

static UNLOCATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<kind>{KINDS}):\s*(?P<msg>.*)$"))
        .expect("diagnostic pattern is valid")
});

/// Parse one line of tool output; `None` if it isn't a diagnostic header.
pub fn parse_diagnostic_line(line: &str) -> Option<Diagnostic> {
    let line = line.trim_end();

    if let Some(caps) = LOCATED.captures(line) {
        let kind = DiagnosticKind::from_label(&caps["kind"]);
        let line_no = caps["line"].parse().unwrap_or(0);
        let col = caps
            .name("col")
            .and_then(|c| c.as_str().parse().ok())
            .unwrap_or(0);
        return Some(
            Diagnostic::new(kind, Some(PathBuf::from(&caps["file"])), &caps["msg"])
                .at(line_no, col),
        );
    }

    UNLOCATED.captures(line).map(|caps| {
        Diagnostic::new(DiagnosticKind::from_label(&caps["kind"]), None, &caps["msg"])
    })
}
