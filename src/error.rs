use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the codec and its file-level helpers.
#[derive(Debug, Error)]
pub enum HuffError {
    /// Input file missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Output file could not be created or finalized.
    #[error("cannot write {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source contained no symbols at all.
    #[error("input contains no symbols")]
    EmptyInput,
    /// Tree construction pulled from an empty queue.
    #[error("priority queue underflow during tree construction")]
    EmptyQueue,
    /// No leaf holds the requested symbol; the tree was built from a
    /// different source than the data being encoded.
    #[error("symbol {0:#04x} has no code in this tree")]
    SymbolNotFound(u8),
    /// The bit stream ended in the middle of a code.
    #[error("bit stream truncated after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },
    /// The payload is inconsistent with the frequency table it was
    /// supposedly encoded under.
    #[error("encoded data does not match its frequency table: {0}")]
    TreeMismatch(String),
    /// Malformed container header or framing.
    #[error("invalid container: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, HuffError>;
