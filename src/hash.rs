//! BLAKE3 hashing utilities for dependency integrity

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use blake3::Hasher;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Verify a hash matches the expected value.
///
/// Manifests may declare digests with or without the `blake3:` prefix and in
/// either case.
pub fn verify_hash(expected: &str, actual: &str) -> bool {
    let normalize = |h: &str| {
        let h = h.trim().to_ascii_lowercase();
        match h.strip_prefix(HASH_PREFIX) {
            Some(rest) => rest.to_string(),
            None => h,
        }
    };

    normalize(expected) == normalize(actual)
}
