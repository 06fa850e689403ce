//! Error types for defscan

use thiserror::Error;

/// defscan error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The comment scrubbing state machine ended up outside its transition
    /// table. This is an internal-logic failure, not malformed input; the
    /// scan of the offending file is aborted.
    #[error("comment scrubber invariant violated: {0}")]
    ScrubberState(String),
}

/// Result type alias for defscan
pub type Result<T> = std::result::Result<T, Error>;
