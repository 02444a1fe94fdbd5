use crate::ebook::epub::consts::{self, tags};
use crate::ebook::epub::write::writer::EpubWriter;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

struct ContainerWriter<'ebook, W> {
    package_path: &'ebook str,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> ContainerWriter<'ebook, W> {
    fn new(package_path: &'ebook str, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            package_path,
        }
    }

    fn write_container(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: tags::CONTAINER,
            attributes: {
                consts::VERSION => consts::CONTAINER_VERSION,
                consts::XMLNS   => consts::CONTAINER_NS,
            }
            inner_content: {
                self.write_root_files()?;
            }
        }
    }

    fn write_root_files(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: tags::ROOT_FILES,
            inner_content: {
                self.write_root_file()?;
            }
        }
    }

    fn write_root_file(&mut self) -> WriterResult<()> {
        // Root file paths are relative to the archive root
        let full_path = uri::encode(self.package_path);

        write_element! {
            writer: self.writer,
            tag: tags::ROOT_FILE,
            attributes: {
                consts::FULL_PATH  => full_path.as_ref(),
                consts::MEDIA_TYPE => consts::PACKAGE_TYPE,
            }
        }
    }
}

impl<W: Write> EpubWriter<'_, W> {
    pub(super) fn write_container(&mut self) -> WriterResult<()> {
        self.zip.start_file(consts::CONTAINER)?;
        ContainerWriter::new(self.epub.package.path(), &mut self.zip).write_container()
    }
}
