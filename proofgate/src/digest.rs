//! SHA-256 digests of evidence artefacts.
//!
//! Digests are held as 64 uppercase hexadecimal characters, the form the
//! structural verdict records. Comparison against a recorded digest ignores
//! case and surrounding whitespace.

use crate::error::{ProofgateError, Result};
use camino::Utf8Path;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::Read;

/// Size of the read buffer used when hashing files.
const CHUNK_SIZE: usize = 8192;

/// A hex-encoded SHA-256 digest in uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Hashes `bytes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use proofgate::digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"");
    /// assert_eq!(
    ///     digest.as_str(),
    ///     "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
    /// );
    /// ```
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self::from_hasher(Sha256::new_with_prefix(bytes))
    }

    /// Hashes the file at `path`, streaming it in fixed-size chunks.
    ///
    /// # Errors
    ///
    /// Returns [`ProofgateError::Read`] if the file cannot be opened or read.
    pub fn of_file(path: &Utf8Path) -> Result<Self> {
        let read_error = |source| ProofgateError::Read {
            path: path.to_owned(),
            source,
        };
        let mut file = fs::File::open(path).map_err(read_error)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let bytes_read = file.read(&mut buffer).map_err(read_error)?;
            let Some(chunk) = buffer.get(..bytes_read) else {
                break;
            };
            if chunk.is_empty() {
                break;
            }
            hasher.update(chunk);
        }
        Ok(Self::from_hasher(hasher))
    }

    fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{:X}", hasher.finalize()))
    }

    /// Returns the digest as an uppercase hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when `recorded` names this digest.
    ///
    /// # Examples
    ///
    /// ```
    /// use proofgate::digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"");
    /// let recorded = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n";
    /// assert!(digest.matches_recorded(recorded));
    /// ```
    #[must_use]
    pub fn matches_recorded(&self, recorded: &str) -> bool {
        self.0.eq_ignore_ascii_case(recorded.trim())
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
