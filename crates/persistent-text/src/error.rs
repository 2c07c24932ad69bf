//! Error types for buffer construction, character access and cursor
//! arithmetic.
//!
//! Every failure in this crate is a deterministic function of the caller's
//! arguments, surfaced synchronously. Nothing is retried or logged, and a
//! failed construction leaves all existing buffers untouched.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TextError>;

/// Errors produced by buffer constructors, accessors and cursors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error(
        "invalid replacement: cut {cut_from}..{cut_to} of base (length {base_len}), \
         patch {patch_from}..{patch_to} of patch (length {patch_len})"
    )]
    /// A replacement was requested with malformed indices. The construction
    /// fails as a whole; no buffer is produced.
    Range {
        /// Inclusive start of the cut range in the base buffer.
        cut_from: usize,
        /// Exclusive end of the cut range in the base buffer.
        cut_to: usize,
        /// Character count of the base buffer.
        base_len: usize,
        /// Inclusive start of the taken range in the patch buffer.
        patch_from: usize,
        /// Exclusive end of the taken range in the patch buffer.
        patch_to: usize,
        /// Character count of the patch buffer.
        patch_len: usize,
    },

    #[error("index {index} out of range for buffer of length {length}")]
    /// A character was requested outside `[0, length)`. Signed so that the
    /// cursor's `-1` sentinel reports faithfully.
    OutOfRange {
        /// The offending index.
        index: isize,
        /// Character count of the buffer.
        length: usize,
    },

    #[error("cursors target different buffers")]
    /// Two cursors over distinct buffer values were compared or subtracted.
    /// Buffers are compared by identity, not content: a pre-edit buffer and
    /// its successor are unrelated even when their text overlaps.
    CrossBufferMismatch,
}
