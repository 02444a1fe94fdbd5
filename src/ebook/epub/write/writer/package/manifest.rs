use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::package::ManifestItem;
use crate::ebook::epub::write::writer::href;
use crate::ebook::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_manifest(&mut self) -> WriterResult<()> {
        let package = self.package;

        write_element! {
            writer: self.writer,
            tag: tags::MANIFEST,
            inner_content: {
                for item in package.manifest() {
                    self.write_manifest_item(item)?;
                }
            }
        }
    }

    fn write_manifest_item(&mut self, item: &ManifestItem) -> WriterResult<()> {
        let href = href(self.package.directory(), item.path());
        let media_type = item.media_type();

        write_element! {
            writer: self.writer,
            tag: tags::ITEM,
            attributes: {
                consts::ID         => item.id(),
                consts::HREF       => href.as_ref(),
                // An absent media type is inferred from the extension upon reading
                consts::MEDIA_TYPE where !media_type.is_empty() => media_type,
                consts::FALLBACK   => item.fallback(),
                consts::PROPERTIES => item.properties(),
            }
        }
    }
}
