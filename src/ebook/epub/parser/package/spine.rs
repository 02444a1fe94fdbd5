use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::package::{Spine, SpineItemRef};
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::parser::package::PackageContext;
use crate::parser::ParserResult;
use crate::parser::xml::XmlElement;
use quick_xml::events::BytesStart;

impl EpubParser<'_> {
    pub(super) fn parse_spine(
        &self,
        ctx: &mut PackageContext,
        spine: &BytesStart,
        is_start: bool,
    ) -> ParserResult<Spine> {
        let mut itemrefs = Vec::new();
        let toc = spine.get_attribute(consts::TOC);

        // A self-closing spine has no entries
        if !is_start {
            return Ok(Spine { toc, itemrefs });
        }

        while let Some(el) = Self::simple_handler(&mut ctx.reader, bytes::SPINE, bytes::ITEMREF)? {
            let mut attributes = el.bytes_attributes();

            // Required fields
            let Some(idref) = self.require_attribute(
                attributes.take_attribute_value(consts::IDREF),
                "spine > itemref[*idref]",
            )?
            else {
                continue;
            };

            // Optional fields
            let linear = attributes
                .take_attribute_value(consts::LINEAR)
                .is_none_or(|linear| linear.trim() != "no");

            itemrefs.push(SpineItemRef { idref, linear });
        }
        Ok(Spine { toc, itemrefs })
    }
}
