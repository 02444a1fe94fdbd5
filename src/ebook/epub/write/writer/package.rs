mod manifest;
mod metadata;
mod spine;

use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::package::Package;
use crate::ebook::epub::write::writer::EpubWriter;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

/// Default EPUB version when the package declares none.
const DEFAULT_VERSION: &str = "3.0";

pub(super) struct PackageWriter<'ebook, W> {
    package: &'ebook Package,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> PackageWriter<'ebook, W> {
    fn new(package: &'ebook Package, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            package,
        }
    }

    fn write_opf(mut self) -> WriterResult<()> {
        let package = self.package;
        let version = match package.version().trim() {
            "" => DEFAULT_VERSION,
            version => version,
        };

        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: tags::PACKAGE,
            attributes: {
                consts::XMLNS     => consts::OPF_NS,
                consts::VERSION   => version,
                consts::UNIQUE_ID => package.unique_identifier(),
            }
            inner_content: {
                self.write_metadata()?;
                self.write_manifest()?;
                self.write_spine()?;
            }
        }
    }
}

impl<W: Write> EpubWriter<'_, W> {
    pub(super) fn write_package(&mut self) -> WriterResult<()> {
        // ZIP entries use decoded paths (archive keys).
        self.zip.start_file(self.epub.package.path())?;
        PackageWriter::new(&self.epub.package, &mut self.zip).write_opf()
    }
}
