use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gensync::fs::mock::MockFileSystem;
use gensync::fs::FileSystem;
use gensync::sync::reconcile;
use proptest::prelude::*;

// Files always end in `.txt` and directories never do, so a generated tree
// never holds a file and a directory under the same name.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    let dir = prop::sample::select(vec!["d0", "d1", "d2"]);
    let file = prop::sample::select(vec!["a.txt", "b.txt", "c.txt"]);
    let path = (prop::collection::vec(dir, 0..3), file).prop_map(|(dirs, file)| {
        let mut parts: Vec<&str> = dirs;
        parts.push(file);
        parts.join("/")
    });
    prop::collection::btree_map(path, "[a-c]{0,3}", 0..8)
}

fn populate(fs: &MockFileSystem, root: &str, files: &BTreeMap<String, String>) {
    fs.add_dir(root);
    for (rel, content) in files {
        fs.add_file(Path::new(root).join(rel), content.as_bytes());
    }
}

fn snapshot(fs: &MockFileSystem, root: &Path) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir).unwrap() {
            if fs.is_dir(&path) {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().to_string();
                out.insert(rel, fs.read_to_string(&path).unwrap());
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn full_sync_yields_exact_mirror(
        staged in tree_strategy(),
        existing in tree_strategy(),
    ) {
        let fs = MockFileSystem::new();
        populate(&fs, "/stage", &staged);
        populate(&fs, "/out", &existing);

        reconcile(&fs, false, Path::new("/stage"), Path::new("/out")).unwrap();

        prop_assert_eq!(snapshot(&fs, Path::new("/out")), staged);
    }

    #[test]
    fn incremental_sync_yields_superset(
        staged in tree_strategy(),
        existing in tree_strategy(),
    ) {
        let fs = MockFileSystem::new();
        populate(&fs, "/stage", &staged);
        populate(&fs, "/out", &existing);

        reconcile(&fs, true, Path::new("/stage"), Path::new("/out")).unwrap();

        let mut expected = existing.clone();
        expected.extend(staged.clone());
        prop_assert_eq!(snapshot(&fs, Path::new("/out")), expected);
    }

    #[test]
    fn second_sync_of_same_output_does_not_mutate(
        staged in tree_strategy(),
        existing in tree_strategy(),
        incremental in any::<bool>(),
    ) {
        let fs = MockFileSystem::new();
        populate(&fs, "/stage", &staged);
        populate(&fs, "/out", &existing);
        reconcile(&fs, incremental, Path::new("/stage"), Path::new("/out")).unwrap();

        fs.remove_dir_all(Path::new("/stage")).unwrap();
        populate(&fs, "/stage", &staged);
        let before = fs.mutations();
        let report = reconcile(&fs, incremental, Path::new("/stage"), Path::new("/out")).unwrap();

        prop_assert!(report.is_noop());
        prop_assert_eq!(fs.mutations(), before);
    }
}
