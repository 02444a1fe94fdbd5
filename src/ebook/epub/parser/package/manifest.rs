use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::package::ManifestItem;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::parser::package::{ItemLocations, PackageContext};
use crate::parser::ParserResult;
use crate::parser::xml::XmlElement;
use crate::util::uri;
use std::collections::HashSet;

impl EpubParser<'_> {
    pub(super) fn parse_manifest(
        &self,
        ctx: &mut PackageContext,
    ) -> ParserResult<(Vec<ManifestItem>, ItemLocations)> {
        let mut items = Vec::new();
        let mut locations = Vec::new();
        let mut ids = HashSet::new();

        while let Some(el) = Self::simple_handler(&mut ctx.reader, bytes::MANIFEST, bytes::ITEM)? {
            let mut attributes = el.bytes_attributes();

            // Required fields
            let Some(id) = self.require_attribute(
                attributes.take_attribute_value(consts::ID),
                "manifest > item[*id]",
            )?
            else {
                continue;
            };
            let Some(href) = self.require_attribute(
                attributes.take_attribute_value(consts::HREF),
                "manifest > item[*href]",
            )?
            else {
                continue;
            };

            // Optional fields
            // An absent media type is classified by extension instead
            let mut media_type = attributes
                .take_attribute_value(consts::MEDIA_TYPE)
                .unwrap_or_default();
            let fallback = attributes.take_attribute_value(consts::FALLBACK);
            let properties = attributes.take_attribute_value(consts::PROPERTIES);

            if ids.contains(&id) {
                if self.is_strict() {
                    return Err(EpubError::DuplicateItemId(id).into());
                }
                tracing::warn!(%id, "Skipping manifest item with duplicate id");
                continue;
            }

            let (href, _) = uri::split_fragment(&href);
            let href = href.replace('\\', "/");

            if uri::has_scheme(&href) {
                tracing::warn!(%id, %href, "Skipping remote manifest item");
                continue;
            }

            // Set media_type to lowercase to enforce uniformity.
            media_type.make_ascii_lowercase();
            ids.insert(id.clone());
            locations.push(
                uri::resolve(ctx.directory_raw, &href)
                    .trim_start_matches('/')
                    .to_owned(),
            );
            items.push(ManifestItem {
                id,
                path: uri::into_key(ctx.directory, &href),
                media_type,
                properties,
                fallback,
            });
        }

        Ok((items, locations))
    }
}
