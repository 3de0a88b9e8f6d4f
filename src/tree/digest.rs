//! Digest algorithms and the hex-encoded digest value

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

/// Hash algorithm used for both file digests and the tree aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// 128-bit MD5, the reference algorithm
    #[default]
    Md5,
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    /// Length of the hex representation
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 32,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Blake3 => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Start a fresh streaming accumulator
    pub fn hasher(self) -> StreamingHasher {
        match self {
            DigestAlgorithm::Md5 => StreamingHasher::Md5(Md5::new()),
            DigestAlgorithm::Sha256 => StreamingHasher::Sha256(Sha256::new()),
            DigestAlgorithm::Blake3 => StreamingHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    /// Digest a complete in-memory input
    pub fn digest_bytes(self, data: &[u8]) -> Digest {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(format!(
                "unsupported digest algorithm '{}' (expected md5, sha256 or blake3)",
                other
            )),
        }
    }
}

/// Incremental hash accumulator
pub enum StreamingHasher {
    Md5(Md5),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl StreamingHasher {
    pub fn update(&mut self, data: &[u8]) {
        match self {
            StreamingHasher::Md5(h) => Sha2Digest::update(h, data),
            StreamingHasher::Sha256(h) => Sha2Digest::update(h, data),
            StreamingHasher::Blake3(h) => {
                h.update(data);
            }
        }
    }

    pub fn finalize(self) -> Digest {
        match self {
            StreamingHasher::Md5(h) => Digest::from_bytes(&h.finalize()),
            StreamingHasher::Sha256(h) => Digest::from_bytes(&h.finalize()),
            StreamingHasher::Blake3(h) => Digest::from_bytes(h.finalize().as_bytes()),
        }
    }
}

/// Lowercase hex digest, immutable once produced
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Digest(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
