use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::metadata::{Creator, Meta, Metadata};
use crate::ebook::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

/// EPUB 3 refinement properties superseding legacy creator attributes.
const ROLE: &str = "role";
const FILE_AS: &str = "file-as";

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_metadata(&mut self) -> WriterResult<()> {
        let package = self.package;
        let metadata = package.metadata();

        write_element! {
            writer: self.writer,
            tag: tags::METADATA,
            attributes: {
                consts::XMLNS_DC  => consts::DC_NS,
                consts::XMLNS_OPF => consts::OPF_NS,
            }
            inner_content: {
                for identifier in metadata.identifiers() {
                    write_element! {
                        writer: self.writer,
                        tag: tags::DC_IDENTIFIER,
                        text: identifier.value(),
                        attributes: {
                            consts::ID         => identifier.id(),
                            consts::OPF_SCHEME => identifier.scheme(),
                        }
                    }?;
                }
                self.write_dc_texts(tags::DC_TITLE, metadata.titles())?;
                for creator in metadata.creators() {
                    self.write_creator(metadata, tags::DC_CREATOR, creator)?;
                }
                for contributor in metadata.contributors() {
                    self.write_creator(metadata, tags::DC_CONTRIBUTOR, contributor)?;
                }
                self.write_dc_texts(tags::DC_LANGUAGE, metadata.languages())?;
                self.write_dc_texts(tags::DC_PUBLISHER, metadata.publishers())?;
                self.write_dc_texts(tags::DC_DESCRIPTION, metadata.descriptions())?;
                self.write_dc_texts(tags::DC_DATE, metadata.dates())?;
                self.write_dc_texts(tags::DC_SUBJECT, metadata.subjects())?;
                for meta in metadata.metas() {
                    self.write_meta(meta)?;
                }
            }
        }
    }

    fn write_dc_texts(&mut self, tag: &'static str, values: &[String]) -> WriterResult<()> {
        for value in values {
            write_element! {
                writer: self.writer,
                tag: tag,
                text: value,
            }?;
        }
        Ok(())
    }

    fn write_creator(
        &mut self,
        metadata: &Metadata,
        tag: &'static str,
        creator: &Creator,
    ) -> WriterResult<()> {
        // Refinements are written as `<meta>` elements instead
        let legacy_role = !Self::is_refined(metadata, creator.id(), ROLE);
        let legacy_file_as = !Self::is_refined(metadata, creator.id(), FILE_AS);

        write_element! {
            writer: self.writer,
            tag: tag,
            text: creator.name(),
            attributes: {
                consts::ID                               => creator.id(),
                consts::OPF_ROLE    where legacy_role    => creator.role(),
                consts::OPF_FILE_AS where legacy_file_as => creator.file_as(),
            }
        }
    }

    fn write_meta(&mut self, meta: &Meta) -> WriterResult<()> {
        if meta.value().is_empty() {
            write_element! {
                writer: self.writer,
                tag: tags::META,
                attributes: {
                    consts::ID       => meta.id(),
                    consts::NAME     => meta.name(),
                    consts::CONTENT  => meta.content(),
                    consts::PROPERTY => meta.property(),
                    consts::REFINES  => meta.refines(),
                }
            }
        } else {
            write_element! {
                writer: self.writer,
                tag: tags::META,
                text: meta.value(),
                attributes: {
                    consts::ID       => meta.id(),
                    consts::NAME     => meta.name(),
                    consts::CONTENT  => meta.content(),
                    consts::PROPERTY => meta.property(),
                    consts::REFINES  => meta.refines(),
                }
            }
        }
    }

    fn is_refined(metadata: &Metadata, id: Option<&str>, property: &str) -> bool {
        id.is_some_and(|id| {
            metadata.metas().iter().any(|meta| {
                meta.property() == Some(property)
                    && meta
                        .refines()
                        .is_some_and(|refines| refines.trim_start_matches('#') == id)
            })
        })
    }
}
