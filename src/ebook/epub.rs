//! The Electronic Publication ([`Epub`]) module.
//!
//! Supports EPUB versions `2` and `3`.
//!
//! For more information regarding the EPUB spec, see:
//! <https://www.w3.org/TR/epub>

pub(crate) mod consts;
pub mod cover;
mod edit;
pub mod errors;
pub mod metadata;
pub mod package;
mod parser;
pub mod resource;
mod text;
pub mod toc;
mod write;

use crate::ebook::archive::EpubArchive;
use crate::ebook::epub::cover::{CoverDecoder, CoverError, CoverImage};
use crate::ebook::epub::metadata::Metadata;
use crate::ebook::epub::package::Package;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::resource::{Resources, SpecialResources, TextContentFile};
use crate::ebook::epub::toc::{Chapter, Navigation, TocFormat};
use crate::ebook::errors::EbookResult;
use crate::util::sync::Once;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

pub use write::EpubWriteOptions;

/// Separator between authors in [`Epub::author`].
const AUTHOR_SEPARATOR: &str = ", ";

/// Electronic Publication (EPUB)
///
/// A flat, fully loaded document model:
/// - [`Package`]: Metadata, manifest and spine
/// - [`Resources`]: Every manifest resource keyed by archive path
/// - [`SpecialResources`]: Container and package documents, and the reading order
/// - [`Chapter`]: The table of contents
///
/// Once read, the archive is no longer needed;
/// all content resides in memory and may be [mutated](Self::remove_resource)
/// then [written](Self::write) as a new archive.
///
/// # Configuration
/// Parsing can be configured using [`EpubOpenOptions`].
///
/// Enabling `threadsafe` (default) makes the lazily decoded
/// [cover image](Self::cover_image) safe to share across threads.
///
/// # Examples
/// - Reading and printing an EPUB as plain text:
/// ```no_run
/// # use folio::Epub;
/// # use folio::ebook::errors::EbookResult;
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open("ebooks/example.epub")?;
///
/// println!("{} by {}", epub.title(), epub.author());
/// println!("{}", epub.to_plain_text());
/// # Ok(())
/// # }
/// ```
pub struct Epub {
    pub(crate) package: Package,
    pub(crate) resources: Resources,
    pub(crate) special_resources: SpecialResources,
    pub(crate) toc: Vec<Chapter>,
    pub(crate) navigation: Option<Navigation>,
    /// Whether edits may have left the navigation documents stale
    pub(crate) toc_modified: bool,
    pub(crate) cover: Option<String>,
    pub(crate) cover_image: Once<Result<CoverImage, CoverError>>,
}

impl Epub {
    /// Opens an [`Epub`] from the given [`Path`] with default [`EpubOpenOptions`].
    ///
    /// # Errors
    /// - [`Archive`](crate::ebook::errors::EbookError::Archive): Missing or unreadable EPUB files.
    /// - [`Format`](crate::ebook::errors::EbookError::Format): Malformed EPUB content.
    ///
    /// # See Also
    /// - [`Self::options`] to specify options.
    /// - [`Self::read`] to open from a byte buffer.
    pub fn open(path: impl AsRef<Path>) -> EbookResult<Self> {
        Self::options().open(path)
    }

    /// Reads an [`Epub`] from any implementation of [`Read`] + [`Seek`]
    /// with default [`EpubOpenOptions`].
    ///
    /// # Examples
    /// - Reading from a [`Cursor`](std::io::Cursor) with an underlying [`Vec`] containing bytes:
    /// ```no_run
    /// # use folio::Epub;
    /// # use folio::ebook::errors::EbookResult;
    /// # fn main() -> EbookResult<()> {
    /// # let epub_bytes = b"";
    /// let cursor = std::io::Cursor::new(epub_bytes.to_vec());
    /// let epub = Epub::read(cursor)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn read<R: Read + Seek>(reader: R) -> EbookResult<Self> {
        Self::options().read(reader)
    }

    /// Returns [`EpubOpenOptions`] to configure parsing.
    pub fn options() -> EpubOpenOptions {
        EpubOpenOptions::default()
    }

    fn new<R: Read + Seek>(options: &EpubOpenOptions, mut archive: EpubArchive<R>) -> EbookResult<Self> {
        let parsed = EpubParser::new(options).parse(&mut archive)?;

        Ok(Self {
            package: parsed.package,
            resources: parsed.resources,
            special_resources: parsed.special_resources,
            toc: parsed.toc,
            navigation: parsed.navigation,
            toc_modified: false,
            cover: parsed.cover,
            cover_image: Once::new(),
        })
    }

    /// The first title, or an empty string if there is none.
    pub fn title(&self) -> &str {
        self.titles().first().map_or("", String::as_str)
    }

    /// All titles in declaration order.
    pub fn titles(&self) -> &[String] {
        self.package.metadata.titles()
    }

    /// Author display names in declaration order.
    pub fn authors(&self) -> Vec<&str> {
        self.package
            .metadata
            .creators()
            .iter()
            .map(|creator| creator.name())
            .collect()
    }

    /// All [`Self::authors`] joined by `", "`.
    ///
    /// # Examples
    /// ```no_run
    /// # use folio::Epub;
    /// # use folio::ebook::errors::EbookResult;
    /// # fn main() -> EbookResult<()> {
    /// let epub = Epub::open("ebooks/example.epub")?;
    ///
    /// assert_eq!(epub.authors().join(", "), epub.author());
    /// # Ok(())
    /// # }
    /// ```
    pub fn author(&self) -> String {
        self.authors().join(AUTHOR_SEPARATOR)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.package.metadata
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn special_resources(&self) -> &SpecialResources {
        &self.special_resources
    }

    /// The (X)HTML resources in spine order.
    pub fn html_in_reading_order(&self) -> impl Iterator<Item = &TextContentFile> + '_ {
        self.special_resources
            .html_in_reading_order
            .iter()
            .filter_map(|path| self.resources.html.get(path))
    }

    /// The table of contents (root chapters).
    pub fn table_of_contents(&self) -> &[Chapter] {
        &self.toc
    }

    /// The navigation document [`Self::table_of_contents`] was built from, if any.
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    /// The archive path of the cover image, if declared.
    pub fn cover_path(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    /// Plain text of every (X)HTML resource in reading order,
    /// one resource per line block, with surrounding whitespace trimmed.
    ///
    /// Malformed markup never fails this operation;
    /// it degrades to best-effort tag stripping.
    pub fn to_plain_text(&self) -> String {
        let mut plain_text = String::new();

        for html in self.html_in_reading_order() {
            plain_text.push_str(&text::html_to_text(&html.text()));
            plain_text.push('\n');
        }
        plain_text.trim().to_owned()
    }

    /// Decodes the cover image using `decoder` upon first access.
    ///
    /// The outcome (including failure) is cached; subsequent calls,
    /// even concurrent ones, never invoke `decoder` again.
    /// Replacing or removing the cover resource resets the cache.
    ///
    /// Returns `Ok(None)` when the EPUB declares no cover image.
    pub fn cover_image(&self, decoder: &dyn CoverDecoder) -> Result<Option<&CoverImage>, CoverError> {
        let Some(path) = self.cover.as_deref() else {
            return Ok(None);
        };
        let Some(file) = self.resources.get(path) else {
            return Ok(None);
        };

        self.cover_image
            .get_or_init(|| {
                tracing::debug!(path, "Decoding cover image");
                decoder
                    .decode(file.content(), path, file.media_type())
                    .map_err(|source| CoverError::Decode {
                        source: Arc::from(source),
                        path: path.to_owned(),
                    })
            })
            .as_ref()
            .map(Some)
            .map_err(Clone::clone)
    }
}

impl Debug for Epub {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Epub")
            .field("package", &self.package)
            .field("resources", &self.resources)
            .field("special_resources", &self.special_resources)
            .field("toc", &self.toc)
            .field("navigation", &self.navigation)
            .field("toc_modified", &self.toc_modified)
            .field("cover", &self.cover)
            .finish_non_exhaustive()
    }
}

/// EPUB-specific options upon parsing an [`Epub`].
///
/// # Examples
/// - Opening an EPUB leniently, preferring the EPUB 2 NCX:
/// ```no_run
/// # use folio::Epub;
/// # use folio::epub::toc::TocFormat;
/// # use folio::ebook::errors::EbookResult;
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::options()
///     .strict(false)
///     .preferred_toc(TocFormat::Ncx)
///     .open("ebooks/example.epub")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct EpubOpenOptions {
    pub(crate) strict: bool,
    pub(crate) preferred_toc: TocFormat,
}

impl EpubOpenOptions {
    /// When set to `true`, ensures an EPUB conforms to the following:
    /// - Elements (i.e., `rootfile`, `item`, `itemref`) have their required attributes present.
    /// - Manifest item ids are unique.
    /// - The package contains a `manifest` and `spine`.
    /// - A declared navigation document contains a `navMap` or `nav`.
    ///
    /// When `false`, offending entries are skipped (with a warning) instead.
    ///
    /// Spine entries referencing missing or non-document
    /// manifest items are always an error.
    ///
    /// Default: `true`
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The navigation document to build the table of contents from
    /// when both the EPUB 2 NCX and EPUB 3 XHTML forms are declared.
    ///
    /// If the preferred form is not available, the other is used instead.
    ///
    /// Default: [`TocFormat::Xhtml`]
    pub fn preferred_toc(mut self, format: TocFormat) -> Self {
        self.preferred_toc = format;
        self
    }

    /// Opens an [`Epub`] from the given [`Path`].
    pub fn open(&self, path: impl AsRef<Path>) -> EbookResult<Epub> {
        Epub::new(self, EpubArchive::open(path.as_ref())?)
    }

    /// Reads an [`Epub`] from any implementation of [`Read`] + [`Seek`].
    pub fn read<R: Read + Seek>(&self, reader: R) -> EbookResult<Epub> {
        Epub::new(self, EpubArchive::new(reader, None)?)
    }
}

impl Default for EpubOpenOptions {
    fn default() -> Self {
        Self {
            strict: true,
            preferred_toc: TocFormat::default(),
        }
    }
}
