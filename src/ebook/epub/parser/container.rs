use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::parser::EpubParser;
use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use quick_xml::events::Event;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location
    /// exactly as declared (`full-path` is always relative to the archive root).
    pub(super) fn parse_container(&self, data: &[u8]) -> ParserResult<String> {
        let mut reader = xml::new_reader(data);

        while let Some(event) = reader.next() {
            let el = match event? {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ROOT_FILE) => el,
                _ => continue,
            };
            // Although rare, multiple package.opf locations could exist.
            // Only accept the first path as it is the default
            let Some(package_file) = el.get_attribute(consts::FULL_PATH) else {
                continue;
            };

            return Ok(package_file.trim_start_matches('/').to_owned());
        }
        Err(EpubError::NoOpfReference.into())
    }
}
