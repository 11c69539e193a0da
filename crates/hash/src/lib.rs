#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! SHA-256 digests for download verification
//!
//! Published artifacts carry a hex SHA-256 checksum. This crate computes
//! digests over byte slices or streamed chunks and compares them against the
//! published hex form.

use papermc_errors::{DecodingError, Error};
use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 digest value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest {
    bytes: [u8; 32],
}

impl Sha256Digest {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Lowercase hex form, as published by the metadata service
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from hex string (either case)
    ///
    /// # Errors
    /// Returns an error if the input is not valid hexadecimal or does not
    /// decode to exactly 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| DecodingError::new("SHA-256 digest", format!("invalid hex: {e}")))?;

        let array: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            DecodingError::new(
                "SHA-256 digest",
                format!("digest must be 32 bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Self::from_bytes(array))
    }

    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_bytes(Sha256::digest(data).into())
    }

    /// Case-insensitive comparison with a hex checksum
    #[must_use]
    pub fn matches_hex(&self, expected: &str) -> bool {
        self.to_hex().eq_ignore_ascii_case(expected.trim())
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental hasher for chunks arriving from a network stream
#[derive(Debug, Clone, Default)]
pub struct StreamHasher {
    inner: Sha256,
    bytes: u64,
}

impl StreamHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    #[must_use]
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    #[must_use]
    pub fn finalize(self) -> Sha256Digest {
        Sha256Digest::from_bytes(self.inner.finalize().into())
    }
}
