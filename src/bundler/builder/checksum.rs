//! SHA-256 checksums for the container and the written artifact.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

/// Hex-encoded SHA-256 of an in-memory buffer.
///
/// Embedded in the stub so the mount step can verify what it decoded.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Calculates the SHA-256 checksum of a file.
///
/// Reads the file in 8KB chunks.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_file_sha256(file_path: &std::path::Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
