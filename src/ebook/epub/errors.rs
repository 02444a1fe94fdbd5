//! Error-related types for an [`Epub`](super::Epub).

/// Possible format errors from an [`Epub`](super::Epub).
///
/// # Variants
/// When parsing, error variants flagged with `*` are ignored when
/// [`EpubOpenOptions::strict`](super::EpubOpenOptions::strict)
/// is disabled.
///
/// ## Container Errors (`container.xml`)
/// Occurs within `META-INF/container.xml`:
/// - [`NoOpfReference`](EpubError::NoOpfReference)
/// ## OPF (`.opf`) Package Errors
/// Occurs within the package `.opf` file:
/// - [`NoPackageFound`](EpubError::NoPackageFound)
/// - [`NoManifestFound`](EpubError::NoManifestFound)*
/// - [`DuplicateItemId`](EpubError::DuplicateItemId)*
/// - [`NoSpineFound`](EpubError::NoSpineFound)*
/// - [`InvalidIdref`](EpubError::InvalidIdref)
/// - [`NonDocumentSpineEntry`](EpubError::NonDocumentSpineEntry)
/// ## Toc Errors (`.ncx/.xhtml`)
/// Occurs within ToC `.ncx` or `.xhtml` files:
/// - [`NoTocFound`](EpubError::NoTocFound)*
/// ## General Errors
/// Occurs in any file:
/// - [`MissingAttribute`](EpubError::MissingAttribute)*
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    ////////////////////////////////////////////////////////////////////////////////
    // General
    ////////////////////////////////////////////////////////////////////////////////
    /// A required attribute is missing from an element.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Within `META-INF/container.xml`
    ////////////////////////////////////////////////////////////////////////////////
    /// The container does not contain a reference
    /// pointing to an `.opf` file.
    ///
    /// Error Source: `META-INF/container.xml`
    #[error("Missing `rootfile` element referencing an `.opf` file in `META-INF/container.xml`")]
    NoOpfReference,

    ////////////////////////////////////////////////////////////////////////////////
    // Package-specific errors
    ////////////////////////////////////////////////////////////////////////////////
    /// The `package` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `package` element")]
    NoPackageFound,

    /// The `manifest` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `manifest` element")]
    NoManifestFound,

    /// An `item` element within the manifest contains a duplicate `id`.
    ///
    /// Each item in the manifest must have a unique ID.
    ///
    /// Error Source: `.opf` file
    #[error("Duplicate manifest `item` ID found: {0}")]
    DuplicateItemId(String),

    /// The `spine` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `spine` element")]
    NoSpineFound,

    /// The `idref` field of a spine entry (`itemref`) points to
    /// a non-existent manifest entry (`item`).
    ///
    /// This is never tolerated, as the reading order would otherwise
    /// contain a dangling reference.
    ///
    /// Error Source: `.opf` file
    #[error(
        "Invalid spine entry `idref` field that references a non-existent manifest entry by ID: {0}"
    )]
    InvalidIdref(String),

    /// A spine entry (`itemref`) resolves to a manifest entry that is not
    /// an (X)HTML document, such as an image or stylesheet.
    ///
    /// Error Source: `.opf` file
    #[error("Spine entry `{idref}` references non-document `{path}` ({media_type})")]
    NonDocumentSpineEntry {
        /// The `idref` of the offending spine entry.
        idref: String,
        /// The resource path the entry resolved to.
        path: String,
        /// The declared media type of the resource.
        media_type: String,
    },

    ////////////////////////////////////////////////////////////////////////////////
    // Within `toc.ncx/xhtml`
    ////////////////////////////////////////////////////////////////////////////////
    /// The `table of contents` file contains no `navMap` or `nav` element.
    ///
    /// Error Source: The table of contents (ToC) `.ncx` or `.xhtml` file.
    #[error("No navigation structure (nav or navMap) found in the ToC resource")]
    NoTocFound,
}
