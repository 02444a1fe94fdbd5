//! In-place editing of an [`Epub`].

use crate::ebook::epub::Epub;
use crate::ebook::epub::consts;
use crate::ebook::epub::package::ManifestItem;
use crate::ebook::epub::resource::{ResourceKind, TextContentFile, TextKind};
use crate::ebook::epub::toc::{self, Navigation, TocFormat};
use crate::util::sync::Once;
use crate::util::uri;
use std::borrow::Cow;
use std::collections::HashSet;

/// Prefix of generated manifest item ids.
const GENERATED_ID_PREFIX: &str = "item-";

impl Epub {
    /// Returns the stylesheet or (X)HTML file at `path`.
    ///
    /// `path` is an archive path (e.g., `OEBPS/Text/c1.xhtml`);
    /// backslashes, percent-encoding and dot segments are tolerated.
    ///
    /// # Examples
    /// ```no_run
    /// # use folio::Epub;
    /// # use folio::epub::resource::TextKind;
    /// # use folio::ebook::errors::EbookResult;
    /// # fn main() -> EbookResult<()> {
    /// let epub = Epub::open("ebooks/example.epub")?;
    ///
    /// if let Some(css) = epub.retrieve_text(TextKind::Css, "OEBPS/Styles/main.css") {
    ///     println!("{}", css.text());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn retrieve_text(&self, kind: TextKind, path: &str) -> Option<&TextContentFile> {
        self.resources.text(kind).get(self.resource_key(path).as_ref())
    }

    /// Removes the resource at `path` from the mapping of `kind`.
    ///
    /// Returns `false` if absent, leaving the [`Epub`] untouched.
    ///
    /// Otherwise, every reference to the resource is removed with it:
    /// - Manifest items (and fallbacks pointing to them)
    /// - Spine entries and the reading order
    /// - Table of contents entries (their children take their place)
    /// - Cover image references
    ///
    /// Removing the navigation document the table of contents was built from
    /// hands the table of contents over to the other declared form, if present.
    ///
    /// As a result, a subsequent [write](Self::write) never
    /// produces a dangling reference to `path`.
    pub fn remove_resource(&mut self, path: &str, kind: ResourceKind) -> bool {
        let key = self.resource_key(path).into_owned();

        if !self.resources.remove(&key, kind) {
            return false;
        }

        // Manifest
        let package = &mut self.package;
        let removed_ids = package
            .manifest
            .iter()
            .filter(|item| item.path == key)
            .map(|item| item.id.clone())
            .collect::<HashSet<_>>();

        package.manifest.retain(|item| item.path != key);
        for item in &mut package.manifest {
            if item
                .fallback
                .as_ref()
                .is_some_and(|fallback| removed_ids.contains(fallback))
            {
                item.fallback = None;
            }
        }

        // Spine
        let spine = &mut package.spine;
        spine
            .itemrefs
            .retain(|itemref| !removed_ids.contains(&itemref.idref));
        if spine.toc.as_ref().is_some_and(|id| removed_ids.contains(id)) {
            spine.toc = None;
        }
        self.special_resources
            .html_in_reading_order
            .retain(|path| *path != key);

        // Navigation
        let removed_chapters = toc::remove_targets(&mut self.toc, &key);
        if self
            .navigation
            .as_ref()
            .is_some_and(|navigation| navigation.path == key)
        {
            // The table of contents is kept for the remaining navigation document
            self.navigation = self.remaining_navigation();
        }
        self.toc_modified = true;

        // Cover
        if self.cover.as_deref() == Some(key.as_str()) {
            self.cover = None;
            self.cover_image = Once::new();
            self.package.metadata.metas.retain(|meta| {
                meta.name.as_deref() != Some(consts::COVER)
                    || meta
                        .content
                        .as_ref()
                        .is_none_or(|content| !removed_ids.contains(content) && *content != key)
            });
        }

        tracing::debug!(
            path = %key,
            ?kind,
            manifest_items = removed_ids.len(),
            chapters = removed_chapters,
            "Removed resource",
        );
        true
    }

    /// The first declared navigation document still present, XHTML before NCX.
    fn remaining_navigation(&self) -> Option<Navigation> {
        let package = &self.package;

        [
            (TocFormat::Xhtml, package.nav_item()),
            (TocFormat::Ncx, package.ncx_item()),
        ]
        .into_iter()
        .find_map(|(format, item)| {
            let item = item?;
            self.resources.contains(item.path()).then(|| Navigation {
                format,
                id: item.id.clone(),
                path: item.path.clone(),
            })
        })
    }

    /// Adds a new resource at `path`, declared in the manifest
    /// with a generated id, which is returned.
    ///
    /// The resource is classified by `media_type`
    /// (or the extension of `path` if it is empty).
    /// It is not added to the spine.
    ///
    /// Returns [`None`] if a resource already exists at `path`.
    pub fn add_resource(
        &mut self,
        path: &str,
        media_type: &str,
        content: Vec<u8>,
    ) -> Option<String> {
        let key = uri::into_key("", path);

        if key.is_empty() || self.resources.contains(&key) {
            return None;
        }

        let id = (self.package.manifest.len() + 1..)
            .map(|n| format!("{GENERATED_ID_PREFIX}{n}"))
            .find(|id| self.package.manifest_item(id).is_none())?;
        let kind = ResourceKind::classify(media_type, &key);

        self.resources.insert(key.clone(), kind, media_type, content);
        self.package.manifest.push(ManifestItem {
            id: id.clone(),
            path: key,
            media_type: media_type.to_ascii_lowercase(),
            properties: None,
            fallback: None,
        });
        Some(id)
    }

    /// Replaces the payload of the resource at `path`, of any kind.
    ///
    /// Returns `false` if absent.
    /// Replacing the cover image discards any decoded [`Self::cover_image`].
    /// Replacing a navigation document leaves [`Self::table_of_contents`] as is.
    pub fn replace_content(&mut self, path: &str, content: Vec<u8>) -> bool {
        let key = self.resource_key(path).into_owned();

        if !self.resources.replace_content(&key, content) {
            return false;
        }
        if self.cover.as_deref() == Some(key.as_str()) {
            self.cover_image = Once::new();
        }
        true
    }

    /// The resource key designated by `path`.
    fn resource_key<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if self.resources.contains(path) {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(uri::into_key("", path))
        }
    }
}
