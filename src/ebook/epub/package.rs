//! Package document (`.opf`) model of an [`Epub`](super::Epub).

use crate::ebook::epub::consts;
use crate::ebook::epub::metadata::Metadata;
use crate::util::uri;

/// The parsed package document.
///
/// Upon [writing](super::Epub::write), the package document is regenerated
/// from this model rather than copied from the original bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Package {
    pub(crate) path: String,
    pub(crate) version: String,
    pub(crate) unique_identifier: Option<String>,
    pub(crate) metadata: Metadata,
    pub(crate) manifest: Vec<ManifestItem>,
    pub(crate) spine: Spine,
}

impl Package {
    /// The archive path of the package document (e.g., `OEBPS/content.opf`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The directory [`Self::path`] resides in; manifest hrefs are relative to it.
    pub fn directory(&self) -> &str {
        uri::parent(&self.path)
    }

    /// The declared EPUB `version` (e.g., `2.0`, `3.0`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The id of the `dc:identifier` acting as the unique identifier.
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Manifest items in declaration order.
    pub fn manifest(&self) -> &[ManifestItem] {
        &self.manifest
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    pub fn manifest_item(&self, id: &str) -> Option<&ManifestItem> {
        self.manifest.iter().find(|item| item.id == id)
    }

    pub fn manifest_item_by_path(&self, path: &str) -> Option<&ManifestItem> {
        self.manifest.iter().find(|item| item.path == path)
    }

    /// The EPUB 3 navigation document (`properties="nav"`).
    pub(crate) fn nav_item(&self) -> Option<&ManifestItem> {
        self.manifest.iter().find(|item| item.is_nav())
    }

    /// The NCX referenced by the spine, otherwise the first declared NCX.
    pub(crate) fn ncx_item(&self) -> Option<&ManifestItem> {
        self.spine
            .toc()
            .and_then(|id| self.manifest_item(id))
            .or_else(|| self.manifest.iter().find(|item| item.is_ncx()))
    }
}

/// A manifest `item`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) path: String,
    pub(crate) media_type: String,
    pub(crate) properties: Option<String>,
    pub(crate) fallback: Option<String>,
}

impl ManifestItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The percent-decoded archive path the `href` resolves to.
    ///
    /// This is the key of the resource within [`Resources`](super::resource::Resources).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Space-separated `properties` (e.g., `nav`, `cover-image`).
    pub fn properties(&self) -> Option<&str> {
        self.properties.as_deref()
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.properties
            .as_deref()
            .is_some_and(|properties| properties.split_ascii_whitespace().any(|p| p == property))
    }

    pub(crate) fn is_nav(&self) -> bool {
        self.has_property(consts::NAV_PROPERTY)
    }

    pub(crate) fn is_ncx(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(consts::NCX_TYPE)
    }
}

/// The `spine`: the canonical reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spine {
    pub(crate) toc: Option<String>,
    pub(crate) itemrefs: Vec<SpineItemRef>,
}

impl Spine {
    /// The id of the legacy NCX manifest item (`toc` attribute).
    pub fn toc(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    pub fn itemrefs(&self) -> &[SpineItemRef] {
        &self.itemrefs
    }
}

/// A spine `itemref`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineItemRef {
    pub(crate) idref: String,
    pub(crate) linear: bool,
}

impl SpineItemRef {
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// `false` when declared `linear="no"`.
    pub fn is_linear(&self) -> bool {
        self.linear
    }
}
