use crate::ebook::archive::EpubArchive;
use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::package::Package;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::resource::{ResourceKind, Resources};
use crate::ebook::errors::EbookResult;
use crate::parser::ParserResult;
use crate::util::uri;
use std::collections::HashSet;
use std::io::{Read, Seek};

impl EpubParser<'_> {
    /// Reads every manifest item and sorts it into its typed mapping.
    ///
    /// `locations` are the archive lookup paths of each manifest item.
    pub(super) fn classify<R: Read + Seek>(
        archive: &mut EpubArchive<R>,
        package: &Package,
        locations: &[String],
    ) -> EbookResult<Resources> {
        let mut resources = Resources::default();

        for (item, location) in package.manifest().iter().zip(locations) {
            if resources.contains(item.path()) {
                tracing::warn!(
                    id = item.id(),
                    path = item.path(),
                    "Skipping manifest item with duplicate path",
                );
                continue;
            }
            let content = archive.read_bytes(location)?;
            let kind = ResourceKind::classify(item.media_type(), item.path());

            resources.insert(item.path.clone(), kind, item.media_type(), content);
        }

        tracing::debug!(
            html = resources.html().len(),
            css = resources.css().len(),
            images = resources.images().len(),
            fonts = resources.fonts().len(),
            other = resources.other().len(),
            "Classified resources",
        );
        Ok(resources)
    }

    /// Paths of the spine entries, in order, each of which must be (X)HTML.
    pub(super) fn reading_order(
        package: &Package,
        resources: &Resources,
    ) -> ParserResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut reading_order = Vec::new();

        for itemref in package.spine().itemrefs() {
            let item = package
                .manifest_item(itemref.idref())
                .ok_or_else(|| EpubError::InvalidIdref(itemref.idref.clone()))?;

            if !resources.html().contains_key(item.path()) {
                return Err(EpubError::NonDocumentSpineEntry {
                    idref: itemref.idref.clone(),
                    path: item.path.clone(),
                    media_type: item.media_type.clone(),
                }
                .into());
            }
            if seen.insert(item.path()) {
                reading_order.push(item.path.clone());
            } else {
                tracing::warn!(
                    idref = itemref.idref(),
                    path = item.path(),
                    "Omitting duplicate spine entry from the reading order",
                );
            }
        }
        Ok(reading_order)
    }

    /// The cover image path declared by the `cover-image` manifest property,
    /// otherwise by the EPUB 2 `<meta name="cover" content="...">`.
    pub(super) fn find_cover(package: &Package, resources: &Resources) -> Option<String> {
        let by_property = || {
            package
                .manifest()
                .iter()
                .find(|item| item.has_property(consts::COVER_IMAGE))
        };
        let by_meta = || {
            let content = package.metadata().meta_content(consts::COVER)?;

            // Some EPUB 2 producers reference the path instead of the id
            package.manifest_item(content).or_else(|| {
                package.manifest_item_by_path(&uri::into_key(package.directory(), content))
            })
        };

        by_property()
            .or_else(by_meta)
            .map(|item| item.path.clone())
            .filter(|path| resources.contains(path))
    }
}
