use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::metadata::{Creator, Identifier, Meta, Metadata};
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::parser::package::PackageContext;
use crate::parser::ParserResult;
use crate::parser::xml::{ByteReader, XmlElement, XmlReader};
use quick_xml::events::{BytesStart, Event};

/// EPUB 3 refinement properties applied to creators.
const ROLE: &str = "role";
const FILE_AS: &str = "file-as";

impl EpubParser<'_> {
    pub(super) fn parse_metadata(ctx: &mut PackageContext) -> ParserResult<Metadata> {
        let mut metadata = Metadata::default();
        let reader = &mut ctx.reader;

        while let Some((el, is_start)) = Self::metadata_handler(reader)? {
            // Self-closing elements carry no text
            let mut text = || {
                if is_start {
                    reader.get_text_simple(&el)
                } else {
                    Ok(String::new())
                }
            };

            match el.local_name().as_ref() {
                bytes::TITLE => metadata.titles.push(text()?),
                bytes::LANGUAGE => metadata.languages.push(text()?),
                bytes::PUBLISHER => metadata.publishers.push(text()?),
                bytes::DESCRIPTION => metadata.descriptions.push(text()?),
                bytes::DATE => metadata.dates.push(text()?),
                bytes::SUBJECT => metadata.subjects.push(text()?),
                bytes::CREATOR => metadata.creators.push(Self::creator(&el, text()?)),
                bytes::CONTRIBUTOR => metadata.contributors.push(Self::creator(&el, text()?)),
                bytes::IDENTIFIER => {
                    let mut attributes = el.bytes_attributes();

                    metadata.identifiers.push(Identifier {
                        id: attributes.take_attribute_value(consts::ID),
                        scheme: attributes.take_attribute_value(consts::OPF_SCHEME),
                        value: text()?,
                    });
                }
                bytes::META => {
                    let mut attributes = el.bytes_attributes();

                    metadata.metas.push(Meta {
                        id: attributes.take_attribute_value(consts::ID),
                        name: attributes.take_attribute_value(consts::NAME),
                        content: attributes.take_attribute_value(consts::CONTENT),
                        property: attributes.take_attribute_value(consts::PROPERTY),
                        refines: attributes.take_attribute_value(consts::REFINES),
                        value: text()?,
                    });
                }
                _ => {}
            }
        }

        Self::apply_refinements(&mut metadata);
        Ok(metadata)
    }

    /// Returns the next direct child of `<metadata>` and whether it is a start element.
    fn metadata_handler<'b>(
        reader: &mut ByteReader<'b>,
    ) -> ParserResult<Option<(BytesStart<'b>, bool)>> {
        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) => return Ok(Some((el, true))),
                Event::Empty(el) => return Ok(Some((el, false))),
                Event::End(el) if el.local_name().as_ref() == bytes::METADATA => break,
                _ => {}
            }
        }
        Ok(None)
    }

    fn creator(el: &BytesStart, name: String) -> Creator {
        let mut attributes = el.bytes_attributes();

        Creator {
            id: attributes.take_attribute_value(consts::ID),
            name,
            role: attributes.take_attribute_value(consts::OPF_ROLE),
            file_as: attributes.take_attribute_value(consts::OPF_FILE_AS),
        }
    }

    /// Applies EPUB 3 `<meta refines="#id">` roles and file-as
    /// values to creators and contributors lacking legacy attributes.
    fn apply_refinements(metadata: &mut Metadata) {
        let metas = &metadata.metas;
        let refinement = |id: &str, property: &str| {
            metas
                .iter()
                .find(|meta| {
                    meta.property.as_deref() == Some(property)
                        && meta
                            .refines
                            .as_deref()
                            .is_some_and(|refines| refines.trim_start_matches('#') == id)
                })
                .map(|meta| meta.value.clone())
        };

        for creator in metadata
            .creators
            .iter_mut()
            .chain(metadata.contributors.iter_mut())
        {
            let Some(id) = creator.id.as_deref() else {
                continue;
            };
            if creator.role.is_none() {
                creator.role = refinement(id, ROLE);
            }
            if creator.file_as.is_none() {
                creator.file_as = refinement(id, FILE_AS);
            }
        }
    }
}
