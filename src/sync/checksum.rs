//! CRC-32 checksums used to decide whether a staged file differs from its
//! persistent copy.
//!
//! Reflected CRC-32 (IEEE 802.3, polynomial 0xEDB88320), the same variant as
//! zlib and `java.util.zip.CRC32`. A 256-entry table is built at compile time.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::fs::FileSystem;

/// Reflected CRC-32 polynomial.
const CRC32_POLY: u32 = 0xEDB8_8320;

/// Precomputed CRC-32 lookup table (256 entries).
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ CRC32_POLY;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Incremental CRC-32 state.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.state;
        for &byte in data {
            let idx = ((crc ^ byte as u32) & 0xFF) as usize;
            crc = (crc >> 8) ^ CRC32_TABLE[idx];
        }
        self.state = crc;
    }

    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

/// CRC-32 of a byte slice.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(data);
    crc.finalize()
}

/// CRC-32 of a file's contents, streamed in 8 KiB chunks.
pub fn file_checksum(fs: &dyn FileSystem, path: &Path) -> Result<u32> {
    let mut reader = fs.open_read(path)?;
    let mut crc = Crc32::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("reading {:?} for checksum", path))?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
    }
    Ok(crc.finalize())
}
