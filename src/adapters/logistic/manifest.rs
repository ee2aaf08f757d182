//! Signed model manifest.
//!
//! `manifest.json` binds model files to SHA-256 digests; `model.sig` is an
//! Ed25519 signature over the exact manifest bytes. `sign_model` produces both.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ModelLoadError;

/// Manifest file name, next to the model.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Detached Ed25519 signature over the manifest bytes.
pub const SIGNATURE_FILE: &str = "model.sig";

/// Supported manifest format.
pub const MANIFEST_VERSION: u32 = 1;

/// Allowed clock skew for `created_at`, in seconds.
const MAX_CLOCK_SKEW_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    /// Monotonic release number, e.g. a CI build number.
    pub serial: u64,
    /// Unix timestamp (seconds) when the manifest was created.
    pub created_at: i64,
    /// Relative file name -> lowercase hex SHA-256.
    pub files: BTreeMap<String, String>,
}

impl ModelManifest {
    /// Hash the given files in `dir` into a new manifest.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Io` if a file cannot be read.
    pub fn for_files(
        dir: &Path,
        names: &[&str],
        serial: u64,
        created_at: i64,
    ) -> Result<Self, ModelLoadError> {
        let mut files = BTreeMap::new();
        for name in names {
            let path = dir.join(name);
            let bytes = fs::read(&path).map_err(|source| ModelLoadError::Io { path, source })?;
            files.insert((*name).to_string(), sha256_hex(&bytes));
        }
        Ok(Self {
            version: MANIFEST_VERSION,
            serial,
            created_at,
            files,
        })
    }

    /// Check format, timestamp and that every bound file matches its digest.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Signature` on any mismatch.
    pub fn verify_files(&self, base_dir: &Path, now: i64) -> Result<(), ModelLoadError> {
        if self.version != MANIFEST_VERSION {
            return Err(ModelLoadError::Signature(format!(
                "unsupported manifest version {}",
                self.version
            )));
        }
        if self.created_at > now + MAX_CLOCK_SKEW_SECS {
            return Err(ModelLoadError::Signature(
                "manifest created_at is in the future".into(),
            ));
        }
        if self.files.is_empty() {
            return Err(ModelLoadError::Signature("manifest binds no files".into()));
        }

        for (rel, expected_hex) in &self.files {
            let path = base_dir.join(rel);
            let bytes = fs::read(&path).map_err(|e| {
                ModelLoadError::Signature(format!(
                    "manifest references missing/unreadable file {path:?}: {e}"
                ))
            })?;
            if !constant_time_eq_str(&sha256_hex(&bytes), expected_hex) {
                return Err(ModelLoadError::Signature(format!("file hash mismatch for {rel}")));
            }
        }
        Ok(())
    }

    /// Whether the manifest binds a given file name.
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

/// Lowercase hex SHA-256 of a byte slice.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII hex digests.
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
