//! Node ids for a project.
//!
//! Ids look like `<seed>-<n>`, where the seed is the CRC32 of the project id
//! in hex. Two sessions on the same project therefore produce overlapping
//! ids, and [`IDGenerator::new_unique_id`] steps past the ones a loaded
//! graph already uses.

use crc32fast::Hasher;

/// Hex CRC32 of a project id
pub fn project_seed(project_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(project_id.trim().as_bytes());
    format!("{:08x}", hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    next: u32,
}

impl IDGenerator {
    pub fn new(project_id: &str) -> Self {
        Self::from_seed(project_seed(project_id))
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, next: 1 }
    }

    pub fn new_id(&mut self) -> String {
        let id = format!("{}-{}", self.seed, self.next);
        self.next += 1;
        id
    }

    /// Next id for which `is_taken` returns false
    pub fn new_unique_id(&mut self, is_taken: impl Fn(&str) -> bool) -> String {
        let mut id = self.new_id();
        while is_taken(&id) {
            id = self.new_id();
        }
        id
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
