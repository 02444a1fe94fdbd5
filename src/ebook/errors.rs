//! Error-related types for an [`Epub`](crate::Epub).

pub use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::ebook::epub::errors::EpubError;
use std::error::Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Unified error type.
///
/// Every read is all-or-nothing: when any of these is returned,
/// no partially built [`Epub`](crate::Epub) exists.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EbookError {
    /// File access within the EPUB archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Essential files are missing, malformed, or reference each other inconsistently.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The output sink rejected the written EPUB.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EbookError {
    /// The broad category of this error.
    ///
    /// # Examples
    /// - Classifying a failed read:
    /// ```
    /// # use folio::Epub;
    /// # use folio::ebook::errors::ErrorKind;
    /// let error = Epub::read(std::io::Cursor::new(b"not a zip".to_vec())).unwrap_err();
    ///
    /// assert_eq!(ErrorKind::MalformedDocument, error.kind());
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Archive(ArchiveError::EntryNotFound { .. }) => ErrorKind::EntryNotFound,
            Self::Archive(_) => ErrorKind::MalformedDocument,
            Self::Format(FormatError::Epub(
                EpubError::InvalidIdref(_) | EpubError::NonDocumentSpineEntry { .. },
            )) => ErrorKind::DanglingReference,
            Self::Format(_) => ErrorKind::MalformedDocument,
            Self::Io(_) => ErrorKind::WriteFailure,
        }
    }
}

impl From<EpubError> for EbookError {
    fn from(error: EpubError) -> Self {
        Self::Format(FormatError::Epub(error))
    }
}

/// The category of an [`EbookError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Container access exhausted all path variants of an entry.
    EntryNotFound,
    /// The container pointer, package document, or navigation document
    /// cannot be structurally parsed (or the archive itself is unreadable).
    MalformedDocument,
    /// A spine or navigation entry references an id or path that
    /// does not exist in the manifest or classified resources.
    DanglingReference,
    /// The underlying sink rejected output.
    WriteFailure,
}

/// Possible format errors for an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// Ebook file content unexpectedly causes an internal parser error.
    ///
    /// This may originate from malformed content within a file, such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Format errors specific to EPUB.
    #[error(transparent)]
    Epub(#[from] EpubError),
}
