use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::toc::TocParser;
use crate::ebook::epub::toc::Chapter;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use quick_xml::events::{BytesStart, Event};

impl TocParser<'_> {
    /// Parses the `navMap` of an EPUB 2 NCX document.
    ///
    /// Returns [`None`] if there is no `navMap`.
    pub(super) fn parse_ncx(mut self) -> ParserResult<Option<Vec<Chapter>>> {
        let mut in_nav_map = false;

        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::NAV_MAP => in_nav_map = true,
                    bytes::NAV_POINT if in_nav_map => self.stack.push(Chapter::default()),
                    bytes::NAV_LABEL if in_nav_map => self.handle_ncx_label(&el)?,
                    bytes::NAV_CONTENT if in_nav_map => self.handle_ncx_src(&el),
                    _ => {}
                },
                Event::Empty(el) => match el.local_name().as_ref() {
                    bytes::NAV_MAP => return Ok(Some(Vec::new())),
                    bytes::NAV_POINT if in_nav_map => {
                        self.stack.push(Chapter::default());
                        self.handle_pop();
                    }
                    bytes::NAV_CONTENT if in_nav_map => self.handle_ncx_src(&el),
                    _ => {}
                },
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::NAV_MAP => break,
                    bytes::NAV_POINT if in_nav_map => self.handle_pop(),
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(in_nav_map.then(|| self.finish()))
    }

    fn handle_ncx_label(&mut self, el: &BytesStart) -> ParserResult<()> {
        // Extract text content
        let label = self.reader.get_text_simple(el)?;

        if let Some(chapter) = self.stack.last_mut() {
            chapter.title = label;
        }
        Ok(())
    }

    fn handle_ncx_src(&mut self, el: &BytesStart) {
        let Some(src) = el.get_attribute(consts::SRC) else {
            return;
        };
        let (file, anchor) = self.target(&src);

        if let Some(chapter) = self.stack.last_mut() {
            chapter.file = file;
            chapter.anchor = anchor;
        }
    }
}
