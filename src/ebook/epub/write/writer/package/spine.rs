use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

/// The `linear` attribute value of auxiliary spine entries.
const NON_LINEAR: &str = "no";

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_spine(&mut self) -> WriterResult<()> {
        let package = self.package;
        let spine = package.spine();

        write_element! {
            writer: self.writer,
            tag: tags::SPINE,
            attributes: {
                consts::TOC => spine.toc(),
            }
            inner_content: {
                for itemref in spine.itemrefs() {
                    write_element! {
                        writer: self.writer,
                        tag: tags::ITEMREF,
                        attributes: {
                            consts::IDREF => itemref.idref(),
                            consts::LINEAR where !itemref.is_linear() => NON_LINEAR,
                        }
                    }?;
                }
            }
        }
    }
}
