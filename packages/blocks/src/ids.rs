//! Block id generation.
//!
//! Ids are `{seed}-{counter}` where the seed is a CRC32 of the document
//! identifier. Sequential ids keep snapshots diffable and make test output
//! stable; uniqueness holds within one editing session, which is the only
//! scope the store ever compares ids in.

use crc32fast::Hasher;

/// Derive a stable document seed from a document identifier
pub fn document_seed(document_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(document_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator for one document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(document_id: &str) -> Self {
        Self {
            seed: document_seed(document_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Next block id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
