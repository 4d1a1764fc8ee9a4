//! Error types for address manipulation.

use std::path::PathBuf;

/// Errors raised when an address operation would break the address grammar.
///
/// Every variant renders as a human-readable message suitable for a
/// user-facing diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// A grammar precondition was violated (e.g. adding an instance to an
    /// address that has no entry section).
    #[error("{0}")]
    Grammar(String),

    /// The address has no entry section where one was required.
    #[error("No entry section in address")]
    MissingEntrySection,

    /// The file segment could not be made relative to the requested base.
    #[error("failed to get relative path: {source}")]
    Relativize {
        /// File segment of the address
        file: PathBuf,
        /// Base directory the file was relativized against
        base: PathBuf,
        /// Underlying path error
        #[source]
        source: RelativePathError,
    },
}

impl AddressError {
    /// Create a grammar error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Grammar(message.into())
    }
}

/// Errors from lexical path relativization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelativePathError {
    /// One path is absolute and the other is not, or their roots differ.
    #[error("can't make {target} relative to {base}")]
    Incompatible {
        /// Base path
        base: PathBuf,
        /// Path that was being relativized
        target: PathBuf,
    },

    /// The base climbs above the common ancestor with `..` components.
    #[error("can't make {target} relative to {base}: base escapes common ancestor")]
    Unreachable {
        /// Base path
        base: PathBuf,
        /// Path that was being relativized
        target: PathBuf,
    },
}
