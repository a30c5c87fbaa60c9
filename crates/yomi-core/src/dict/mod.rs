//! Surface-keyed lexicon storage.
//!
//! `SurfaceDictionary` maps surface forms to their readings and word costs.
//! The analyzer walks it with common-prefix search to build its lattice.

mod composite;
mod entry;
pub mod source;
mod surface_dict;
#[cfg(test)]
mod tests;

pub use composite::{dedup_entries, CompositeDictionary};
pub use entry::DictEntry;
pub use surface_dict::{DictStats, SurfaceDictionary};

use std::io;

/// Error type for lexicon parsing and binary I/O.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected YMDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// One surface matched by a prefix search, with all of its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub surface: String,
    pub entries: Vec<DictEntry>,
}

pub trait Dictionary: Send + Sync {
    /// Entries for an exact surface, cheapest first.
    fn lookup(&self, surface: &str) -> Vec<DictEntry>;

    /// Every dictionary surface that is a prefix of `text`, shortest first.
    fn common_prefix_search(&self, text: &str) -> Vec<SearchResult>;
}
