use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::toc::TocParser;
use crate::ebook::epub::toc::{self, Chapter};
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use quick_xml::events::{BytesStart, Event};

impl<'a> TocParser<'a> {
    /// Parses the table of contents `nav` of an EPUB 3 navigation document.
    ///
    /// When `toc_only` is `true`, only a `nav` whose `epub:type` includes `toc`
    /// is accepted, otherwise the first `nav` is.
    /// Returns [`None`] if no such `nav` exists.
    pub(super) fn parse_xhtml(mut self, toc_only: bool) -> ParserResult<Option<Vec<Chapter>>> {
        // Reading text may consume an important event, so
        // temporarily store consumed events to continue from.
        let mut next_event = None;
        // Nesting depth of `nav` elements within the selected `nav`
        let mut depth = 0_usize;

        while let Some(event) = self.reader.take_or_next(&mut next_event) {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::NAV if depth > 0 => depth += 1,
                    bytes::NAV if !toc_only || Self::is_toc(&el) => depth = 1,
                    bytes::LIST_ITEM if depth > 0 => next_event = self.push_nav_child(&el)?,
                    bytes::ANCHOR if depth > 0 => self.handle_nav_anchor(&el, true)?,
                    _ => {}
                },
                Event::Empty(el) => match el.local_name().as_ref() {
                    bytes::NAV if depth == 0 && (!toc_only || Self::is_toc(&el)) => {
                        return Ok(Some(Vec::new()));
                    }
                    bytes::ANCHOR if depth > 0 => self.handle_nav_anchor(&el, false)?,
                    _ => {}
                },
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::NAV if depth > 1 => depth -= 1,
                    bytes::NAV if depth == 1 => return Ok(Some(self.finish())),
                    bytes::LIST_ITEM if depth > 0 => self.handle_pop(),
                    _ => {}
                },
                _ => {}
            }
        }

        // A truncated document still yields what was read
        Ok((depth > 0).then(|| self.finish()))
    }

    fn is_toc(el: &BytesStart) -> bool {
        el.get_attribute(consts::EPUB_TYPE)
            .is_some_and(|epub_type| toc::is_toc_type(&epub_type))
    }

    fn push_nav_child(&mut self, el: &BytesStart<'a>) -> ParserResult<Option<Event<'a>>> {
        let mut consumed_event = None;

        // For EPUB 3, <li> elements may act as a grouping header
        // if there's no direct <a> element containing an href & label.
        //
        // If the element does contain a direct <a> element,
        // the label retrieved here will be overridden.
        let label = self.reader.get_text_till_either(
            &mut consumed_event,
            el.name().as_ref(),
            bytes::ANCHOR,
        )?;

        self.stack.push(Chapter::new(label, String::new(), None));
        Ok(consumed_event)
    }

    fn handle_nav_anchor(&mut self, el: &BytesStart, is_start: bool) -> ParserResult<()> {
        let label = if is_start {
            Some(self.reader.get_text_simple(el)?)
        } else {
            None
        };
        let target = el.get_attribute(consts::HREF).map(|href| self.target(&href));

        if let Some(chapter) = self.stack.last_mut() {
            if let Some((file, anchor)) = target {
                chapter.file = file;
                chapter.anchor = anchor;
            }
            if let Some(label) = label {
                chapter.title = label;
            }
        }
        Ok(())
    }
}
