//! Streaming content hashing for single files

use crate::error::HashError;
use crate::tree::digest::{Digest, DigestAlgorithm};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

/// Default read buffer size (64 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Computes content digests by streaming file bytes through a fixed buffer
#[derive(Debug, Clone)]
pub struct FileHasher {
    algorithm: DigestAlgorithm,
    buffer_size: usize,
}

impl FileHasher {
    /// MD5 hasher with the default buffer size
    pub fn new() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the read buffer size; zero is bumped to one byte
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Hash the content of a regular file
    ///
    /// The path is checked before opening so that FIFOs and directories are
    /// rejected instead of blocking or failing mid-read.
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let metadata = fs::metadata(path).map_err(|e| HashError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(HashError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let digest = self
            .hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))?;
        trace!(path = %path.display(), digest = %digest, "Hashed file");
        Ok(digest)
    }

    /// Hash everything a reader yields until EOF
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut hasher = self.algorithm.hasher();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize())
    }
}

impl Default for FileHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// MD5 digest of a file's content
pub fn hash_file(path: &Path) -> Result<Digest, HashError> {
    FileHasher::new().hash_file(path)
}
