use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::{debug, info};

use crate::fs::FileSystem;

/// Name of the hashes file inside the state directory.
///
/// The effective path on disk is `<state_directory>/hashes`.
pub const HASH_FILE_NAME: &str = "hashes";

/// Compute the blake3 hash of a single file.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = fs
        .open_read(path)
        .with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Abstract storage for per-source-file hashes recorded at the last
/// successful build.
pub trait HashStore: Send + Sync {
    fn load_all(&self) -> Result<BTreeMap<PathBuf, String>>;
    fn store_all(&mut self, hashes: &BTreeMap<PathBuf, String>) -> Result<()>;
}

/// Stores hashes in `<state_directory>/hashes`, one `<hash> <path>` per line.
pub struct FileHashStore {
    state_dir: PathBuf,
}

impl FileHashStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    fn path(&self) -> PathBuf {
        self.state_dir.join(HASH_FILE_NAME)
    }
}

impl HashStore for FileHashStore {
    fn load_all(&self) -> Result<BTreeMap<PathBuf, String>> {
        let path = self.path();

        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&path)
            .with_context(|| format!("opening hash file at {:?}", path))?;
        let reader = BufReader::new(file);

        let mut map = BTreeMap::new();
        for line_res in reader.lines() {
            let line = line_res?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            // Paths may contain spaces; the hash never does.
            if let Some((hash, file)) = trimmed.split_once(' ') {
                map.insert(PathBuf::from(file), hash.to_string());
            }
        }

        debug!(entries = map.len(), path = ?path, "loaded source hashes");
        Ok(map)
    }

    fn store_all(&mut self, hashes: &BTreeMap<PathBuf, String>) -> Result<()> {
        let path = self.path();

        fs::create_dir_all(&self.state_dir).with_context(|| {
            format!("creating state directory at {:?}", self.state_dir)
        })?;

        let file = File::create(&path)
            .with_context(|| format!("creating hash file at {:?}", path))?;
        let mut writer = BufWriter::new(file);

        for (file, hash) in hashes.iter() {
            writeln!(writer, "{} {}", hash, file.display())?;
        }

        writer.flush()?;
        info!(entries = hashes.len(), "stored source hashes (file)");
        Ok(())
    }
}

/// Stores hashes in memory only.
#[derive(Default)]
pub struct MemoryHashStore {
    map: BTreeMap<PathBuf, String>,
}

impl MemoryHashStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashStore for MemoryHashStore {
    fn load_all(&self) -> Result<BTreeMap<PathBuf, String>> {
        Ok(self.map.clone())
    }

    fn store_all(&mut self, hashes: &BTreeMap<PathBuf, String>) -> Result<()> {
        self.map = hashes.clone();
        info!(entries = hashes.len(), "stored source hashes (memory)");
        Ok(())
    }
}
