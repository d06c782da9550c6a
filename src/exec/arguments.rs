// src/exec/arguments.rs

//! Command-line construction for javac-compatible processors.

use crate::exec::backend::ProcessRequest;

/// Insertion-ordered option list where a later insert of the same key
/// replaces the earlier value in place.
#[derive(Debug, Default)]
struct OptionList {
    entries: Vec<(String, Option<String>)>,
}

impl OptionList {
    fn put(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Separator between entries of `-sourcepath`.
const PATH_LIST_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Build the tool arguments for `request`, source files last.
///
/// Defaults, in order: `-encoding`, `-proc:only`, `-processor`, one
/// `-A<key>=<value>` per processor option, `-s <output_dir>`, `-nowarn`
/// unless warnings are shown, `-sourcepath`. Entries of
/// `compiler_options` then override (or extend) these. Blank values are
/// dropped, leaving just the flag.
pub fn build_arguments(request: &ProcessRequest) -> Vec<String> {
    let mut opts = OptionList::default();

    if let Some(encoding) = &request.encoding {
        opts.put("encoding", Some(encoding.clone()));
    }
    opts.put("proc:only", None);
    opts.put("processor", Some(request.processors.clone()));

    for (key, value) in request.options.iter() {
        opts.put(format!("A{key}={value}"), None);
    }

    opts.put("s", Some(request.output_dir.display().to_string()));

    if !request.show_warnings {
        opts.put("nowarn", None);
    }

    if !request.source_path.is_empty() {
        let joined = request
            .source_path
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(PATH_LIST_SEPARATOR);
        opts.put("sourcepath", Some(joined));
    }

    for (key, value) in request.compiler_options.iter() {
        opts.put(key.clone(), Some(value.clone()));
    }

    let mut args = Vec::with_capacity(opts.entries.len() * 2 + request.files.len());
    for (key, value) in opts.entries {
        args.push(format!("-{key}"));
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            args.push(value);
        }
    }
    args.extend(request.files.iter().map(|f| f.display().to_string()));
    args
}
