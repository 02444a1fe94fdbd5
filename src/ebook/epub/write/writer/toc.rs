mod ncx;
mod splice;
mod xhtml;

use crate::ebook::epub::Epub;
use crate::ebook::epub::toc::{Chapter, TocFormat};
use crate::ebook::epub::write::writer::toc::ncx::NcxTocWriter;
use crate::ebook::epub::write::writer::toc::splice::TocSplicer;
use crate::ebook::epub::write::writer::toc::xhtml::XhtmlTocWriter;
use crate::ebook::epub::write::writer::{self, EpubWriter};
use crate::writer::WriterResult;
use std::io::Write;

impl<W: Write> EpubWriter<'_, W> {
    /// Rewrites the declared navigation documents once the table of contents was edited.
    ///
    /// The current table of contents is spliced into each document,
    /// keeping its remaining markup (e.g., landmarks).
    /// Documents without a `nav` or `navMap` to splice into are regenerated entirely.
    pub(super) fn write_toc(&mut self) -> WriterResult<()> {
        let epub = self.epub;

        for (format, path) in navigation_documents(epub) {
            let Some(file) = epub.resources.get(path) else {
                continue;
            };
            let spliced = TocSplicer::new(epub, format, path, file.content()).splice()?;

            self.zip.start_file(path)?;
            match (spliced, format) {
                (Some(document), _) => self.zip.write_all(&document)?,
                (None, TocFormat::Ncx) => {
                    tracing::warn!(path, "Regenerating NCX document");
                    NcxTocWriter::new(epub, path, &mut self.zip).write_ncx()?;
                }
                (None, TocFormat::Xhtml) => {
                    tracing::warn!(path, "Regenerating navigation document");
                    XhtmlTocWriter::new(epub, path, &mut self.zip).write_xhtml()?;
                }
            }
        }
        Ok(())
    }
}

/// The declared navigation documents (EPUB 3 and EPUB 2 forms) to rewrite.
///
/// Empty unless the table of contents was edited,
/// as the documents are otherwise written as-is.
pub(super) fn navigation_documents(epub: &Epub) -> Vec<(TocFormat, &str)> {
    if !epub.toc_modified {
        return Vec::new();
    }
    let package = epub.package();
    let declared = [
        (TocFormat::Xhtml, package.nav_item()),
        (TocFormat::Ncx, package.ncx_item()),
    ];
    let mut documents = Vec::with_capacity(declared.len());

    for (format, item) in declared {
        let Some(item) = item else {
            continue;
        };
        let path = item.path();

        if epub.resources.contains(path) && documents.iter().all(|(_, other)| *other != path) {
            documents.push((format, path));
        }
    }
    documents
}

/// The href of `chapter` relative to the directory of the navigation document.
///
/// Returns [`None`] for chapters without a target.
fn chapter_href(directory: &str, chapter: &Chapter) -> Option<String> {
    let mut href = match chapter.file() {
        "" if chapter.anchor().is_none() => return None,
        "" => String::new(),
        file => writer::href(directory, file).into_owned(),
    };
    if let Some(anchor) = chapter.anchor() {
        href.push('#');
        href.push_str(anchor);
    }
    Some(href)
}
