//! Hashing utilities for comparing staged libraries with their NDK source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check whether two files have identical content.
pub fn same_content(a: &Path, b: &Path) -> Result<bool> {
    let len_a = std::fs::metadata(a)
        .with_context(|| format!("failed to read metadata: {}", a.display()))?
        .len();
    let len_b = std::fs::metadata(b)
        .with_context(|| format!("failed to read metadata: {}", b.display()))?
        .len();
    if len_a != len_b {
        return Ok(false);
    }
    Ok(sha256_file(a)? == sha256_file(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sha256_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("test.txt");
        std::fs::write(&file_path, "hello world").unwrap();

        assert_eq!(
            sha256_file(&file_path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert!(sha256_file(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn test_same_content() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        let c = tmp.path().join("c");
        std::fs::write(&a, "runtime v1").unwrap();
        std::fs::write(&b, "runtime v1").unwrap();
        std::fs::write(&c, "runtime v2").unwrap();

        assert!(same_content(&a, &b).unwrap());
        assert!(!same_content(&a, &c).unwrap());
        assert!(same_content(&a, &tmp.path().join("missing")).is_err());
    }
}
