//! Opaque file names for uploads.
//!
//! Names are the SHA-1 of the original base name joined with a timestamp.
//! Only practical uniqueness matters here, not collision resistance.

use sha1::{Digest, Sha1};
use thiserror::Error;

/// Length of a generated name, without extension.
pub const HASH_LEN: usize = 40;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NamingError {
    #[error("cannot generate a name from an empty seed")]
    EmptyInput,
}

/// Hex-encoded SHA-1 digest of `seed`.
pub fn generate_hash(seed: &str) -> Result<String, NamingError> {
    if seed.is_empty() {
        return Err(NamingError::EmptyInput);
    }
    let digest = Sha1::digest(seed.as_bytes());
    Ok(format!("{digest:x}"))
}

/// Seed for a file name: `"<name>:<secs>"`.
///
/// `unix_secs` is truncated to 32 bits.
pub fn hash_seed(name: &str, unix_secs: i64) -> String {
    format!("{name}:{}", unix_secs as i32)
}

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
