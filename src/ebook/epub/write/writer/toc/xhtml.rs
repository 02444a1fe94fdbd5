use crate::ebook::epub::Epub;
use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::toc::Chapter;
use crate::ebook::epub::write::writer::toc::chapter_href;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

const DOCTYPE: &str = "html";

enum Step<'a> {
    List(&'a [Chapter]),
    Item(&'a Chapter),
    End(&'static str),
}

pub(super) struct XhtmlTocWriter<'ebook, W> {
    epub: &'ebook Epub,
    /// Directory of the navigation document, which hrefs are relative to
    directory: &'ebook str,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> XhtmlTocWriter<'ebook, W> {
    pub(super) fn new(epub: &'ebook Epub, path: &'ebook str, writer: W) -> Self {
        Self {
            directory: uri::parent(path),
            writer: XmlWriter::new(writer),
            epub,
        }
    }

    pub(super) fn write_xhtml(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?.write_doctype(DOCTYPE)?;

        write_element! {
            writer: self.writer,
            tag: tags::HTML,
            attributes: {
                consts::XMLNS      => consts::XHTML_NS,
                consts::XMLNS_EPUB => consts::OPS_NS,
            }
            inner_content: {
                self.write_head()?;
                self.write_body()?;
            }
        }
    }

    fn write_head(&mut self) -> WriterResult<()> {
        let title = self.epub.title();

        write_element! {
            writer: self.writer,
            tag: tags::HEAD,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: tags::TITLE,
                    text: title,
                }?;
            }
        }
    }

    fn write_body(&mut self) -> WriterResult<()> {
        let chapters = self.epub.table_of_contents();

        write_element! {
            writer: self.writer,
            tag: tags::BODY,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: tags::NAV,
                    attributes: {
                        consts::EPUB_TYPE => consts::TOC_TYPE,
                        consts::ID        => consts::TOC_TYPE,
                    }
                    inner_content: {
                        self.write_list(chapters)?;
                    }
                }?;
            }
        }
    }

    /// Writes nested `ol` and `li` elements without recursion.
    pub(super) fn write_list(&mut self, chapters: &[Chapter]) -> WriterResult<()> {
        let mut stack = vec![Step::List(chapters)];

        while let Some(step) = stack.pop() {
            match step {
                Step::List(chapters) => {
                    self.writer.start_element(tags::ORDERED_LIST)?;
                    stack.push(Step::End(tags::ORDERED_LIST));
                    stack.extend(chapters.iter().rev().map(Step::Item));
                }
                Step::Item(chapter) => {
                    self.writer.start_element(tags::LIST_ITEM)?;
                    self.write_label(chapter)?;
                    stack.push(Step::End(tags::LIST_ITEM));

                    if !chapter.children().is_empty() {
                        stack.push(Step::List(chapter.children()));
                    }
                }
                Step::End(tag) => self.writer.finish_end_element(tag)?,
            }
        }
        Ok(())
    }

    /// Chapters with a target are written as an anchor, otherwise as a heading `span`.
    fn write_label(&mut self, chapter: &Chapter) -> WriterResult<()> {
        match chapter_href(self.directory, chapter) {
            Some(href) => write_element! {
                writer: self.writer,
                tag: tags::ANCHOR,
                text: chapter.title(),
                attributes: {
                    consts::HREF => href.as_str(),
                }
            },
            None => write_element! {
                writer: self.writer,
                tag: tags::SPAN,
                text: chapter.title(),
            },
        }
    }
}
