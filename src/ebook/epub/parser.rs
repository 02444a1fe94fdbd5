mod classifier;
mod container;
mod package;
mod toc;

use crate::ebook::archive::EpubArchive;
use crate::ebook::epub::EpubOpenOptions;
use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::package::Package;
use crate::ebook::epub::resource::{ResourceKind, Resources, SpecialResources, TextContentFile};
use crate::ebook::epub::toc::{Chapter, Navigation};
use crate::ebook::errors::EbookResult;
use crate::parser::ParserResult;
use std::io::{Read, Seek};

/// Media type of `META-INF/container.xml`.
const CONTAINER_TYPE: &str = "application/xml";

pub(super) struct ParsedContent {
    pub(super) package: Package,
    pub(super) resources: Resources,
    pub(super) special_resources: SpecialResources,
    pub(super) toc: Vec<Chapter>,
    pub(super) navigation: Option<Navigation>,
    pub(super) cover: Option<String>,
}

pub(super) struct EpubParser<'a> {
    options: &'a EpubOpenOptions,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(options: &'a EpubOpenOptions) -> Self {
        Self { options }
    }

    pub(super) fn parse<R: Read + Seek>(
        &self,
        archive: &mut EpubArchive<R>,
    ) -> EbookResult<ParsedContent> {
        // Parse "META-INF/container.xml"
        let ocf = archive.read_bytes(consts::CONTAINER)?;
        let full_path = self.parse_container(&ocf)?;

        // Parse "package.opf"
        let opf = archive.read_bytes(&full_path)?;
        let (package, locations) = self.parse_opf(&full_path, &opf)?;
        tracing::debug!(
            path = package.path(),
            version = package.version(),
            items = package.manifest().len(),
            "Parsed package document",
        );

        // Read every manifest item into its mapping
        let resources = Self::classify(archive, &package, &locations)?;
        let html_in_reading_order = Self::reading_order(&package, &resources)?;

        // Parse "toc.xhtml/ncx"
        let (navigation, toc) = self.parse_navigation(&package, &resources)?;
        let cover = Self::find_cover(&package, &resources);

        let special_resources = SpecialResources {
            ocf: TextContentFile::new(consts::CONTAINER, ResourceKind::Other, CONTAINER_TYPE, ocf),
            opf: TextContentFile::new(
                package.path(),
                ResourceKind::Other,
                consts::PACKAGE_TYPE,
                opf,
            ),
            html_in_reading_order,
        };

        Ok(ParsedContent {
            package,
            resources,
            special_resources,
            toc,
            navigation,
            cover,
        })
    }

    // Helper methods
    fn is_strict(&self) -> bool {
        self.options.strict
    }

    fn assert_required<T>(error: EpubError, value: Option<T>) -> ParserResult<T> {
        value.ok_or_else(|| error.into())
    }

    /// Returns `value` if present.
    ///
    /// A missing value is an error when `strict` is enabled;
    /// otherwise [`None`] is returned and the caller skips the element.
    fn require_attribute<T>(
        &self,
        value: Option<T>,
        error_message: &'static str,
    ) -> ParserResult<Option<T>> {
        match value {
            None if self.is_strict() => {
                Err(EpubError::MissingAttribute(String::from(error_message)).into())
            }
            None => {
                tracing::warn!(attribute = error_message, "Skipping element with missing attribute");
                Ok(None)
            }
            value => Ok(value),
        }
    }
}
