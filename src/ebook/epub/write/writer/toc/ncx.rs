use crate::ebook::epub::Epub;
use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::toc::{self, Chapter};
use crate::ebook::epub::write::writer::toc::chapter_href;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

const NAV_POINT_ID_PREFIX: &str = "nav-point-";

enum Step<'a> {
    Open(&'a Chapter),
    Close,
}

pub(super) struct NcxTocWriter<'ebook, W> {
    epub: &'ebook Epub,
    /// Directory of the NCX document, which hrefs are relative to
    directory: &'ebook str,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> NcxTocWriter<'ebook, W> {
    pub(super) fn new(epub: &'ebook Epub, path: &'ebook str, writer: W) -> Self {
        Self {
            directory: uri::parent(path),
            writer: XmlWriter::new(writer),
            epub,
        }
    }

    pub(super) fn write_ncx(mut self) -> WriterResult<()> {
        // DOCTYPE for NCX is omitted as EPUB 2 does not require it:
        // https://idpf.org/epub/20/spec/OPF_2.0_latest.htm#Section2.4.1.2
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: tags::NCX,
            attributes: {
                consts::XMLNS   => consts::NCX_NS,
                consts::VERSION => consts::NCX_VERSION,
            }
            inner_content: {
                self.write_ncx_head()?;
                self.write_ncx_doc_title()?;
                self.write_ncx_nav_map()?;
            }
        }
    }

    fn write_ncx_head(&mut self) -> WriterResult<()> {
        const UNKNOWN: &str = "urn:unknown";
        const ZERO: &str = "0";

        let epub = self.epub;
        let metadata = epub.metadata();
        let uid = epub
            .package()
            .unique_identifier()
            .and_then(|id| metadata.identifier_by_id(id))
            .or_else(|| metadata.identifiers().first())
            .map_or(UNKNOWN, |identifier| identifier.value());
        // Depth must be at least 1
        let depth = toc::max_depth(epub.table_of_contents()).max(1).to_string();

        write_element! {
            writer: self.writer,
            tag: tags::HEAD,
            inner_content: {
                self.write_ncx_meta("dtb:uid", uid)?;
                self.write_ncx_meta(consts::DTB_DEPTH, &depth)?;
                self.write_ncx_meta("dtb:totalPageCount", ZERO)?;
                self.write_ncx_meta("dtb:maxPageNumber", ZERO)?;
            }
        }
    }

    fn write_ncx_meta(&mut self, name: &str, content: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: tags::META,
            attributes: {
                consts::NAME    => name,
                consts::CONTENT => content,
            }
        }
    }

    fn write_ncx_doc_title(&mut self) -> WriterResult<()> {
        let title = self.epub.title();

        write_element! {
            writer: self.writer,
            tag: tags::DOC_TITLE,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: tags::TEXT,
                    text: title,
                }?;
            }
        }
    }

    fn write_ncx_nav_map(&mut self) -> WriterResult<()> {
        let chapters = self.epub.table_of_contents();

        write_element! {
            writer: self.writer,
            tag: tags::NAV_MAP,
            inner_content: {
                self.write_nav_points(chapters)?;
            }
        }
    }

    /// Writes nested `navPoint` elements without recursion.
    pub(super) fn write_nav_points(&mut self, chapters: &[Chapter]) -> WriterResult<()> {
        let mut stack = chapters.iter().rev().map(Step::Open).collect::<Vec<_>>();
        let mut play_order = 0_usize;

        while let Some(step) = stack.pop() {
            let chapter = match step {
                Step::Open(chapter) => chapter,
                Step::Close => {
                    self.writer.finish_end_element(tags::NAV_POINT)?;
                    continue;
                }
            };
            play_order += 1;

            let order = play_order.to_string();
            let id = format!("{NAV_POINT_ID_PREFIX}{order}");

            self.writer
                .start_element(tags::NAV_POINT)?
                .add_attribute(consts::ID, id.as_str())
                .add_attribute(consts::PLAY_ORDER, order.as_str());
            self.write_nav_label(chapter)?;

            // Chapters without a target have no content
            if let Some(src) = chapter_href(self.directory, chapter) {
                write_element! {
                    writer: self.writer,
                    tag: tags::CONTENT,
                    attributes: {
                        consts::SRC => src.as_str(),
                    }
                }?;
            }

            stack.push(Step::Close);
            stack.extend(chapter.children().iter().rev().map(Step::Open));
        }
        Ok(())
    }

    fn write_nav_label(&mut self, chapter: &Chapter) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: tags::NAV_LABEL,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: tags::TEXT,
                    text: chapter.title(),
                }?;
            }
        }
    }
}
