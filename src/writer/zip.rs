use crate::ebook::errors::EbookError;
use crate::writer::WriterResult;
use std::io::Write;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub(crate) trait ZipFileOptionsExt {
    fn zip_compression_level(self, level: u8) -> Self;
}

impl ZipFileOptionsExt for SimpleFileOptions {
    fn zip_compression_level(self, level: u8) -> Self {
        if level == 0 {
            self.compression_method(CompressionMethod::Stored)
        } else {
            self.compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level.min(9))))
        }
    }
}

pub(crate) struct ZipWriter<W: Write> {
    inner: zip::ZipWriter<zip::write::StreamWriter<W>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl<W: Write> ZipWriter<W> {
    pub(crate) fn new(writer: W, compression: u8) -> Self {
        Self {
            inner: zip::ZipWriter::new_stream(writer),
            options: SimpleFileOptions::default().zip_compression_level(compression),
            entries: 0,
        }
    }

    fn start_zip_file_entry(&mut self, name: &str, options: SimpleFileOptions) -> WriterResult<()> {
        self.entries += 1;
        self.inner
            // Strip leading '/' to avoid absolute paths in the archive.
            .start_file(name.trim_start_matches('/'), options)
            .map_err(from_zip_error)
    }

    /// Starts an entry stored without compression (required for `mimetype`).
    pub(crate) fn start_uncompressed_file(&mut self, name: &str) -> WriterResult<()> {
        self.start_zip_file_entry(
            name,
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
    }

    pub(crate) fn start_file(&mut self, name: &str) -> WriterResult<()> {
        self.start_zip_file_entry(name, self.options)
    }

    pub(crate) fn finish(self) -> WriterResult<W> {
        tracing::debug!(entries = self.entries, "Finished writing archive");
        self.inner
            .finish()
            .map_err(from_zip_error)
            .map(|stream_writer| stream_writer.into_inner())
    }
}

impl<W: Write> Write for ZipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

fn from_zip_error(error: zip::result::ZipError) -> EbookError {
    EbookError::Io(match error {
        zip::result::ZipError::Io(error) => error,
        error => std::io::Error::other(error),
    })
}
