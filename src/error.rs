//! Error types for embedded-filesystem recovery.

use thiserror::Error;

/// Fatal errors surfaced by the library.
///
/// Candidate rejection during validation is deliberately absent: a bad
/// candidate is a filtering decision, not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The input magic matches none of the supported containers.
    #[error("unrecognized file format")]
    UnrecognizedFormat,

    /// The expected read-only section is absent from the binary.
    #[error("section \"{0}\" does not exist")]
    SectionMissing(String),

    /// A sized read returned fewer bytes than requested.
    #[error("size mismatch between bytes read ({actual}) and requested ({expected})")]
    ReadMismatch { expected: u64, actual: u64 },

    /// The pointer width of the target machine cannot be determined.
    #[error("unsupported {0} architecture")]
    UnsupportedArchitecture(&'static str),

    /// Entry index outside a candidate's table.
    #[error("entry index {index} out of range ({count} entries)")]
    EntryOutOfRange { index: u64, count: u64 },

    /// Container parsing failed.
    #[error(transparent)]
    Object(#[from] object::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
