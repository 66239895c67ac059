//! Embedded-filesystem recovery from compiled binaries.
//!
//! This library scans the read-only data section of a stripped executable
//! (ELF, PE, or Mach-O) for embedded-filesystem headers, validates each
//! hit, and exposes the recovered file tree: names, contents, directory
//! markers, and content hashes.

pub mod binary;
pub mod candidate;
pub mod error;
pub mod manifest;
pub mod scan;
pub mod section;
pub mod tree;

#[cfg(test)]
pub(crate) mod testutil;

pub use binary::{detect, Executable};
pub use candidate::{Blob, Candidate, Entry};
pub use error::{Error, Result};
pub use scan::{find_candidates, ScanConfig, DEFAULT_CHUNK_SIZE, MAX_FILE_SIZE};
pub use section::{ByteOrder, SectionView};
pub use tree::FileTree;
