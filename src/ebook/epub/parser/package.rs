mod manifest;
mod metadata;
mod spine;

use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::package::Package;
use crate::ebook::epub::parser::EpubParser;
use crate::parser::ParserResult;
use crate::parser::xml::{self, ByteReader, XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};

/// Archive lookup paths of the manifest items, in manifest order.
///
/// Unlike [`ManifestItem::path`](crate::epub::package::ManifestItem::path),
/// these are kept as declared (only resolved against the package directory)
/// so that percent-encoded archive entry names still match.
pub(super) type ItemLocations = Vec<String>;

pub(super) struct PackageContext<'a> {
    pub(super) reader: ByteReader<'a>,
    /// Directory of the package document as an archive key.
    pub(super) directory: &'a str,
    /// Directory of the package document as declared by the container.
    pub(super) directory_raw: &'a str,
}

impl EpubParser<'_> {
    /// Parses the `.opf` file at `full_path` (as declared by the container).
    pub(super) fn parse_opf(
        &self,
        full_path: &str,
        data: &[u8],
    ) -> ParserResult<(Package, ItemLocations)> {
        let path = uri::into_key("", full_path);
        let mut ctx = PackageContext {
            reader: xml::new_reader(data),
            directory: uri::parent(&path),
            directory_raw: uri::parent(full_path),
        };
        let mut package = None;
        let mut metadata = None;
        let mut manifest = None;
        let mut spine = None;

        while let Some(event) = ctx.reader.next() {
            let (el, is_start) = match event? {
                Event::Start(el) => (el, true),
                Event::Empty(el) => (el, false),
                _ => continue,
            };
            match el.local_name().as_ref() {
                bytes::PACKAGE => {
                    package.replace(Self::parse_package(&el));
                }
                // Self-closing sections are empty
                bytes::METADATA if !is_start => {
                    metadata.get_or_insert_default();
                }
                bytes::MANIFEST if !is_start => {
                    manifest.get_or_insert_with(|| (Vec::new(), Vec::new()));
                }
                bytes::METADATA => {
                    metadata.replace(Self::parse_metadata(&mut ctx)?);
                }
                bytes::MANIFEST => {
                    manifest.replace(self.parse_manifest(&mut ctx)?);
                }
                bytes::SPINE => {
                    spine.replace(self.parse_spine(&mut ctx, &el, is_start)?);
                }
                _ => {}
            }
        }

        let (version, unique_identifier) =
            Self::assert_required(EpubError::NoPackageFound, package)?;
        let (manifest, locations) = self.relaxed(EpubError::NoManifestFound, manifest)?;
        let spine = self.relaxed(EpubError::NoSpineFound, spine)?;

        Ok((
            Package {
                path,
                version,
                unique_identifier,
                metadata: metadata.unwrap_or_default(),
                manifest,
                spine,
            },
            locations,
        ))
    }

    fn parse_package(package: &BytesStart) -> (String, Option<String>) {
        let mut attributes = package.bytes_attributes();
        let version = attributes
            .take_attribute_value(consts::VERSION)
            .unwrap_or_default();
        let unique_id = attributes.take_attribute_value(consts::UNIQUE_ID);

        (version, unique_id)
    }

    /// A required section, which defaults to empty when `strict` is disabled.
    fn relaxed<T: Default>(&self, error: EpubError, value: Option<T>) -> ParserResult<T> {
        match value {
            Some(value) => Ok(value),
            None if self.is_strict() => Err(error.into()),
            None => {
                tracing::warn!("{error}; defaulting to empty");
                Ok(T::default())
            }
        }
    }

    /// Returns the next `child` element until the end of `parent`.
    fn simple_handler<'b>(
        reader: &mut ByteReader<'b>,
        parent: &[u8],
        child: &[u8],
    ) -> ParserResult<Option<BytesStart<'b>>> {
        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) | Event::Empty(el) if el.local_name().as_ref() == child => {
                    return Ok(Some(el));
                }
                Event::End(el) if el.local_name().as_ref() == parent => {
                    break;
                }
                _ => {}
            }
        }
        Ok(None)
    }
}
