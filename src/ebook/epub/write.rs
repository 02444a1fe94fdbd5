mod writer;

use crate::ebook::epub::Epub;
use crate::ebook::epub::write::writer::EpubWriter;
use crate::ebook::errors::EbookResult;
use std::io::{Cursor, Write};
use std::path::Path;

/// Default deflate level of written entries.
const DEFAULT_COMPRESSION: u8 = 6;

impl Epub {
    /// Returns [`EpubWriteOptions`] to write this [`Epub`] as a new archive.
    ///
    /// The package document is regenerated from the current model.
    /// Once resources are [removed](Epub::remove_resource), the table of contents
    /// is also rewritten within each navigation document.
    /// Every other resource is written as-is.
    ///
    /// # Examples
    /// - Removing a chapter and saving the result:
    /// ```no_run
    /// # use folio::Epub;
    /// # use folio::epub::resource::ResourceKind;
    /// # use folio::ebook::errors::EbookResult;
    /// # fn main() -> EbookResult<()> {
    /// let mut epub = Epub::open("ebooks/example.epub")?;
    ///
    /// epub.remove_resource("OEBPS/Text/c2.xhtml", ResourceKind::Html);
    /// epub.write().compression(9).save("ebooks/trimmed.epub")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write(&self) -> EpubWriteOptions<'_> {
        EpubWriteOptions {
            epub: self,
            compression: DEFAULT_COMPRESSION,
        }
    }
}

/// Configuration to write an [`Epub`], accessible via [`Epub::write`].
///
/// # Entries
/// Entries are written in the following order:
/// 1. `mimetype` (always stored without compression)
/// 2. `META-INF/container.xml`
/// 3. The package document
/// 4. The rewritten navigation documents (if any), XHTML before NCX
/// 5. Every resource, in manifest order
#[derive(Clone, Debug)]
pub struct EpubWriteOptions<'ebook> {
    epub: &'ebook Epub,
    compression: u8,
}

impl EpubWriteOptions<'_> {
    /// Sets the deflate compression level of written entries:
    /// - `0`: Stored (no compression)
    /// - `1..=9`: Fastest to smallest (values above `9` are clamped)
    ///
    /// Default: `6`
    pub fn compression(&mut self, level: u8) -> &mut Self {
        self.compression = level;
        self
    }

    /// Writes the [`Epub`] to the given [`Path`].
    ///
    /// The archive is first written to a temporary sibling file,
    /// which replaces `path` only once complete.
    pub fn save(&self, path: impl AsRef<Path>) -> EbookResult<()> {
        const TEMP: &str = "folio.tmp";

        let path = path.as_ref();
        let temp = path.with_extension(TEMP);

        let write_result = (|| -> EbookResult<()> {
            let file = std::fs::File::create(&temp)?;
            let mut buf = std::io::BufWriter::new(file);

            self.write(&mut buf)?;

            // Write the remaining bytes to file
            buf.flush()?;
            std::fs::rename(&temp, path)?;
            Ok(())
        })();

        if let Err(error) = write_result {
            // Attempt to remove the temp file
            let _ = std::fs::remove_file(&temp);
            // Original error takes precedence
            return Err(error);
        }
        Ok(())
    }

    /// Writes the [`Epub`] to any implementation of [`Write`],
    /// returning the writer afterward.
    pub fn write<W: Write>(&self, writer: W) -> EbookResult<W> {
        EpubWriter::new(self.epub, self.compression, writer).write()
    }

    /// Writes the [`Epub`] into a new byte buffer.
    pub fn to_vec(&self) -> EbookResult<Vec<u8>> {
        self.write(Cursor::new(Vec::new())).map(Cursor::into_inner)
    }
}
