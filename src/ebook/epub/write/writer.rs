mod container;
mod package;
mod resource;
mod toc;

use crate::ebook::epub::Epub;
use crate::ebook::epub::consts;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::zip::ZipWriter;
use std::borrow::Cow;
use std::io::Write;

pub(super) struct EpubWriter<'ebook, W: Write> {
    epub: &'ebook Epub,
    zip: ZipWriter<W>,
}

impl<'ebook, W: Write> EpubWriter<'ebook, W> {
    pub(super) fn new(epub: &'ebook Epub, compression: u8, writer: W) -> Self {
        Self {
            epub,
            zip: ZipWriter::new(writer, compression),
        }
    }

    pub(super) fn write(mut self) -> WriterResult<W> {
        tracing::debug!(package = self.epub.package.path(), "Writing EPUB");

        self.write_mimetype()?;
        self.write_container()?;
        self.write_package()?;
        self.write_toc()?;
        self.write_resources()?;
        self.zip.finish()
    }

    fn write_mimetype(&mut self) -> WriterResult<()> {
        // EPUB requires that the mimetype file must be uncompressed
        self.zip.start_uncompressed_file(consts::MIMETYPE)?;
        self.zip.write_all(consts::EPUB_TYPE_VALUE.as_bytes())?;
        Ok(())
    }
}

/// The percent-encoded href of the archive key `target`
/// relative to the directory `base_dir`.
///
/// Remote targets (e.g., `https://...`) are returned as-is.
fn href<'a>(base_dir: &str, target: &'a str) -> Cow<'a, str> {
    if uri::has_scheme(target) {
        Cow::Borrowed(target)
    } else {
        Cow::Owned(uri::encode(&uri::relativize(base_dir, target)).into_owned())
    }
}
