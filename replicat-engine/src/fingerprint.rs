//! Content fingerprinting — streaming 128-bit checksums for change detection.
//!
//! Two files are considered identical iff their fingerprints are bit-equal.
//! MD5 is fine here: this is change detection, not integrity against an
//! adversary.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{io_err, EngineError};

/// Read buffer size for streaming file content through the hasher.
const CHUNK_SIZE: usize = 4096;

/// 128-bit content checksum of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 16]);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Compute the fingerprint of the file at `path`.
///
/// Reads the file in [`CHUNK_SIZE`] chunks so arbitrarily large files never
/// load fully into memory. Fails with [`EngineError::Io`] if the file cannot
/// be opened or read mid-stream.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, EngineError> {
    let mut file = File::open(path).map_err(|e| io_err(path, e))?;
    let mut ctx = md5::Context::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| io_err(path, e))?;
        if n == 0 {
            break;
        }
        ctx.consume(&buf[..n]);
    }
    Ok(Fingerprint(ctx.compute().0))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn identical_content_same_fingerprint() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        let b = tmp.path().join("b.txt");
        fs::write(&a, "hello").unwrap();
        fs::write(&b, "hello").unwrap();
        assert_eq!(
            fingerprint_file(&a).unwrap(),
            fingerprint_file(&b).unwrap()
        );
    }

    #[test]
    fn different_content_different_fingerprint() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        let b = tmp.path().join("b.txt");
        fs::write(&a, "hello").unwrap();
        fs::write(&b, "hellp").unwrap();
        assert_ne!(
            fingerprint_file(&a).unwrap(),
            fingerprint_file(&b).unwrap()
        );
    }

    #[test]
    fn multi_chunk_file_matches_known_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.bin");
        // Spans several 4 KiB chunks plus a partial tail.
        let content = vec![0xabu8; CHUNK_SIZE * 3 + 17];
        fs::write(&path, &content).unwrap();

        let expected = md5::compute(&content);
        assert_eq!(fingerprint_file(&path).unwrap().0, expected.0);
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.txt");
        let err = fingerprint_file(&path).expect_err("missing file must fail");
        match err {
            EngineError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn display_is_lowercase_hex() {
        let fp = Fingerprint([0u8; 16]);
        assert_eq!(fp.to_string(), "00000000000000000000000000000000");
    }
}
