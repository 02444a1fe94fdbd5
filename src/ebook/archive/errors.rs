use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the ZIP container of an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// No archive entry matches the requested path,
    /// nor any of its separator or percent-encoding variants.
    ///
    /// `path` is the logical path as originally requested.
    #[error("[EntryNotFound - `{path}`]: File not found in archive")]
    EntryNotFound {
        /// The requested logical path.
        path: String,
    },

    /// The entry exists, although is unable to be read, typically I/O
    /// or a corrupt compressed stream.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The physical name of the entry responsible for triggering the error.
        path: String,
    },

    /// The archive itself is unreadable due to not existing,
    /// unsupported format, or malformed state.
    ///
    /// Path is [`None`] when the archive is supplied as a reader
    /// (e.g., [`Epub::read`](crate::Epub::read)).
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },
}
