use crate::ebook::epub::Epub;
use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::toc::{self, TocFormat};
use crate::ebook::epub::write::writer::toc::ncx::NcxTocWriter;
use crate::ebook::epub::write::writer::toc::xhtml::XhtmlTocWriter;
use crate::parser::xml::{self, ByteReader, XmlElement};
use crate::util::uri;
use crate::writer::WriterResult;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

/// An element outside the table of contents (e.g., a landmark `li`)
/// held back until it is known whether it links to a removed resource.
struct Unit<'a> {
    depth: usize,
    dangling: bool,
    events: Vec<Event<'a>>,
}

/// Replaces the table of contents within an existing navigation document,
/// copying the remaining markup as-is.
///
/// Beyond the table of contents:
/// - Entries linking to a resource no longer present are dropped
///   (`li` for XHTML, `navTarget` and `pageTarget` for NCX).
/// - The NCX `dtb:depth` is updated.
pub(super) struct TocSplicer<'ebook> {
    epub: &'ebook Epub,
    format: TocFormat,
    /// Archive key of the navigation document
    path: &'ebook str,
    data: &'ebook [u8],
}

impl<'ebook> TocSplicer<'ebook> {
    pub(super) fn new(epub: &'ebook Epub, format: TocFormat, path: &'ebook str, data: &'ebook [u8]) -> Self {
        Self {
            epub,
            format,
            path,
            data,
        }
    }

    /// Returns the rewritten document, or [`None`] if it cannot be
    /// parsed or holds no `nav` or `navMap` to splice into.
    pub(super) fn splice(&self) -> WriterResult<Option<Vec<u8>>> {
        match find_root(self.format, self.data) {
            Some(root) => self.rewrite(root),
            None => Ok(None),
        }
    }

    /// Whether `el` is an entry of the table of contents, directly within the root.
    fn is_entry(&self, el: &BytesStart) -> bool {
        match self.format {
            TocFormat::Ncx => el.is_local_name(bytes::NAV_POINT),
            TocFormat::Xhtml => el.is_local_name(bytes::ORDERED_LIST),
        }
    }

    fn is_unit(&self, el: &BytesStart) -> bool {
        match self.format {
            TocFormat::Ncx => el.is_local_name(bytes::NAV_TARGET) || el.is_local_name(bytes::PAGE_TARGET),
            TocFormat::Xhtml => el.is_local_name(bytes::LIST_ITEM),
        }
    }

    /// Whether `el` links to a resource that is no longer present.
    ///
    /// Remote and same-document links are never dangling.
    fn is_dangling_link(&self, el: &BytesStart) -> bool {
        let (name, attribute) = match self.format {
            TocFormat::Ncx => (bytes::NAV_CONTENT, consts::SRC),
            TocFormat::Xhtml => (bytes::ANCHOR, consts::HREF),
        };
        if !el.is_local_name(name) {
            return false;
        }
        el.get_attribute(attribute).is_some_and(|href| {
            let (path, _) = uri::split_fragment(href.trim());

            !path.is_empty()
                && !uri::has_scheme(path)
                && !self
                    .epub
                    .resources
                    .contains(&uri::into_key(uri::parent(self.path), path))
        })
    }

    fn rewrite(&self, root: usize) -> WriterResult<Option<Vec<u8>>> {
        let root_name = root_name(self.format);
        let mut reader = reader(self.data);
        let mut out = Writer::new(Vec::with_capacity(self.data.len()));
        let mut units = Vec::<Unit>::new();
        // Number of open elements
        let mut depth = 0_usize;
        let mut roots_seen = 0;
        // Depth of the root element while within it
        let mut root_depth = None;
        // Depth of the stale entry being skipped
        let mut skip_depth = None;
        let mut list_written = false;

        loop {
            let event = match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(event) => event,
                Err(error) => {
                    tracing::warn!(path = self.path, %error, "Unable to splice navigation document");
                    return Ok(None);
                }
            };

            if let Some(skip) = skip_depth {
                match event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth = depth.saturating_sub(1);
                        if depth < skip {
                            skip_depth = None;
                        }
                    }
                    _ => {}
                }
                continue;
            }

            let in_root = root_depth.is_some();
            match event {
                Event::Start(el) => {
                    depth += 1;

                    if root_depth.is_some_and(|root_depth| depth == root_depth + 1) && self.is_entry(&el) {
                        if !list_written {
                            self.write_list(&mut out)?;
                            list_written = true;
                        }
                        skip_depth = Some(depth);
                        continue;
                    }
                    if !in_root && units.is_empty() && el.is_local_name(root_name) {
                        if roots_seen == root {
                            root_depth = Some(depth);
                        }
                        roots_seen += 1;
                    } else if !in_root && self.is_unit(&el) {
                        units.push(Unit {
                            depth,
                            dangling: false,
                            events: Vec::new(),
                        });
                    }
                    let el = self.mark_and_update(&mut units, el, in_root);
                    emit(&mut out, &mut units, Event::Start(el))?;
                }
                Event::Empty(el) => {
                    if root_depth.is_some_and(|root_depth| depth == root_depth) && self.is_entry(&el) {
                        if !list_written {
                            self.write_list(&mut out)?;
                            list_written = true;
                        }
                        continue;
                    }
                    if !in_root && units.is_empty() && el.is_local_name(root_name) {
                        roots_seen += 1;
                        if roots_seen - 1 == root {
                            out.write_event(Event::Start(el.borrow()))?;
                            self.write_list(&mut out)?;
                            out.write_event(Event::End(el.to_end()))?;
                            list_written = true;
                            continue;
                        }
                    }
                    let el = self.mark_and_update(&mut units, el, in_root);
                    emit(&mut out, &mut units, Event::Empty(el))?;
                }
                Event::End(el) => {
                    if root_depth == Some(depth) {
                        if !list_written {
                            self.write_list(&mut out)?;
                            list_written = true;
                        }
                        root_depth = None;
                    }
                    emit(&mut out, &mut units, Event::End(el))?;

                    if units.last().is_some_and(|unit| unit.depth == depth) {
                        close_unit(&mut out, &mut units)?;
                    }
                    depth = depth.saturating_sub(1);
                }
                event => emit(&mut out, &mut units, event)?,
            }
        }

        // Units left open by a truncated document
        for unit in units.drain(..) {
            for event in unit.events {
                out.write_event(event)?;
            }
        }

        Ok(list_written.then(|| out.into_inner()))
    }

    /// Flags the enclosing unit if `el` is a dangling link,
    /// and rewrites the NCX `dtb:depth`.
    fn mark_and_update<'a>(&self, units: &mut [Unit], el: BytesStart<'a>, in_root: bool) -> BytesStart<'a> {
        if let Some(unit) = units.last_mut().filter(|_| !in_root) {
            unit.dangling |= self.is_dangling_link(&el);
        }
        if self.format == TocFormat::Ncx
            && el.is_local_name(bytes::META)
            && el.get_attribute(consts::NAME).as_deref() == Some(consts::DTB_DEPTH)
        {
            return self.with_depth(&el);
        }
        el
    }

    fn with_depth(&self, meta: &BytesStart) -> BytesStart<'static> {
        let depth = toc::max_depth(self.epub.table_of_contents()).max(1).to_string();
        let mut updated = BytesStart::new(String::from_utf8_lossy(meta.name().as_ref()).into_owned());

        for attribute in meta.attributes().filter_map(Result::ok) {
            if attribute.key.as_ref() == consts::CONTENT.as_bytes() {
                updated.push_attribute((consts::CONTENT, depth.as_str()));
            } else {
                updated.push_attribute(attribute);
            }
        }
        updated
    }

    fn write_list(&self, out: &mut Writer<Vec<u8>>) -> WriterResult<()> {
        let chapters = self.epub.table_of_contents();
        let sink = out.get_mut();

        match self.format {
            TocFormat::Ncx => NcxTocWriter::new(self.epub, self.path, sink).write_nav_points(chapters),
            TocFormat::Xhtml => XhtmlTocWriter::new(self.epub, self.path, sink).write_list(chapters),
        }
    }
}

fn reader(data: &[u8]) -> ByteReader<'_> {
    let mut reader = xml::new_reader(data);
    // Navigation documents are frequently sloppy (X)HTML
    reader.config_mut().check_end_names = false;
    reader
}

fn root_name(format: TocFormat) -> &'static [u8] {
    match format {
        TocFormat::Ncx => bytes::NAV_MAP,
        TocFormat::Xhtml => bytes::NAV,
    }
}

/// The position of the root element among elements of the same name.
///
/// For XHTML, the first `nav` typed `toc` is preferred over the first `nav`.
fn find_root(format: TocFormat, data: &[u8]) -> Option<usize> {
    let mut reader = reader(data);
    let mut count = 0;

    loop {
        let el = match reader.read_event() {
            Ok(Event::Start(el) | Event::Empty(el)) => el,
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => continue,
        };
        if !el.is_local_name(root_name(format)) {
            continue;
        }
        if format == TocFormat::Ncx
            || el
                .get_attribute(consts::EPUB_TYPE)
                .is_some_and(|epub_type| toc::is_toc_type(&epub_type))
        {
            return Some(count);
        }
        count += 1;
    }

    (format == TocFormat::Xhtml && count > 0).then_some(0)
}

fn emit<'a>(out: &mut Writer<Vec<u8>>, units: &mut [Unit<'a>], event: Event<'a>) -> WriterResult<()> {
    match units.last_mut() {
        Some(unit) => unit.events.push(event),
        None => out.write_event(event)?,
    }
    Ok(())
}

/// Hands the innermost unit over to its parent (or the output), unless it is dangling.
fn close_unit(out: &mut Writer<Vec<u8>>, units: &mut Vec<Unit>) -> WriterResult<()> {
    let Some(unit) = units.pop() else {
        return Ok(());
    };
    if unit.dangling {
        tracing::debug!("Dropping navigation entry linking to a removed resource");
        return Ok(());
    }
    for event in unit.events {
        emit(out, units, event)?;
    }
    Ok(())
}
