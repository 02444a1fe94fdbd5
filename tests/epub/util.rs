use folio::Epub;
use folio::ebook::errors::EbookResult;
use folio::epub::EpubOpenOptions;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const OPF_PATH: &str = "OEBPS/content.opf";

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

pub const OPF: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:identifier id="uid">urn:uuid:0c1f6d3e-7d2a-4c7e-9a57-2f1c4d8e9b10</dc:identifier>
    <dc:title>Sample Book</dc:title>
    <dc:creator id="author-1">Jane Doe</dc:creator>
    <meta refines="#author-1" property="role" scheme="marc:relators">aut</meta>
    <dc:creator opf:role="aut" opf:file-as="Smith, John">John Smith</dc:creator>
    <dc:language>en</dc:language>
    <meta name="cover" content="cover-image"/>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="chap1" href="Text/chap1.html" media-type="application/xhtml+xml"/>
    <item id="chap2" href="Text/chap2.html" media-type="application/xhtml+xml"/>
    <item id="style" href="Styles/main.css" media-type="text/css"/>
    <item id="cover-image" href="Images/cover.png" media-type="image/png"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="chap1"/>
    <itemref idref="chap2"/>
  </spine>
</package>"##;

pub const NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <head><title>Contents</title></head>
  <body>
    <nav epub:type="toc" id="toc">
      <ol>
        <li><a href="Text/chap1.html">Chapter 1</a>
          <ol>
            <li><a href="Text/chap1.html#sec1">Section 1.1</a>
              <ol>
                <li><a href="Text/chap1.html#sec1a">Part 1.1.a</a></li>
              </ol>
            </li>
            <li><a href="Text/chap1.html#sec2">Section 1.2</a></li>
          </ol>
        </li>
        <li><a href="Text/chap2.html">Chapter 2</a></li>
      </ol>
    </nav>
  </body>
</html>"#;

pub const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:0c1f6d3e-7d2a-4c7e-9a57-2f1c4d8e9b10"/>
  </head>
  <docTitle><text>Sample Book</text></docTitle>
  <navMap>
    <navPoint id="np-1" playOrder="1">
      <navLabel><text>NCX Chapter 1</text></navLabel>
      <content src="Text/chap1.html"/>
    </navPoint>
    <navPoint id="np-2" playOrder="2">
      <navLabel><text>NCX Chapter 2</text></navLabel>
      <content src="Text/chap2.html"/>
    </navPoint>
  </navMap>
</ncx>"#;

pub const CHAPTER_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head><title>Chapter 1</title><link rel="stylesheet" href="../Styles/main.css"/></head>
  <body>
    <p id="sec1">Hello</p>
    <p id="sec2">World</p>
  </body>
</html>"#;

pub const CHAPTER_2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head><title>Chapter 2</title></head>
  <body><h1>Chapter 2</h1><p>Fish &amp; chips</p></body>
</html>"#;

pub const CSS: &str = "p { margin: 0; }";

/// Not a decodable image; only the bytes matter.
pub const COVER: &[u8] = b"\x89PNG\r\n\x1a\nnot really";

/// Assembles an EPUB archive in memory.
pub struct EpubBuilder {
    entries: Vec<(String, Vec<u8>)>,
    mimetype: bool,
}

impl EpubBuilder {
    /// An archive with only the `mimetype` entry.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            mimetype: true,
        }
    }

    /// An archive with a container pointing at [`OPF_PATH`].
    pub fn with_container() -> Self {
        Self::empty().file("META-INF/container.xml", CONTAINER)
    }

    /// The complete sample EPUB.
    pub fn sample() -> Self {
        Self::with_container()
            .file(OPF_PATH, OPF)
            .file("OEBPS/nav.xhtml", NAV)
            .file("OEBPS/toc.ncx", NCX)
            .file("OEBPS/Text/chap1.html", CHAPTER_1)
            .file("OEBPS/Text/chap2.html", CHAPTER_2)
            .file("OEBPS/Styles/main.css", CSS)
            .file("OEBPS/Images/cover.png", COVER)
    }

    pub fn file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        let content = content.as_ref().to_vec();

        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, existing)) => *existing = content,
            None => self.entries.push((name.to_owned(), content)),
        }
        self
    }

    pub fn remove(mut self, name: &str) -> Self {
        self.entries.retain(|(entry, _)| entry != name);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if self.mimetype {
            zip.start_file("mimetype", stored).unwrap();
            zip.write_all(b"application/epub+zip").unwrap();
        }
        for (name, content) in &self.entries {
            zip.start_file(name.as_str(), deflated).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn read(&self) -> EbookResult<Epub> {
        Epub::read(Cursor::new(self.build()))
    }

    pub fn read_with(&self, options: EpubOpenOptions) -> EbookResult<Epub> {
        options.read(Cursor::new(self.build()))
    }

    pub fn open(&self) -> Epub {
        self.read().unwrap()
    }
}

/// [`OPF`] with its manifest and spine replaced.
pub fn opf_with(manifest: &str, spine: &str) -> String {
    let start = OPF.find("<manifest>").unwrap();
    let end = OPF.find("</spine>").unwrap() + "</spine>".len();

    format!(
        "{}<manifest>{manifest}</manifest><spine>{spine}</spine>{}",
        &OPF[..start],
        &OPF[end..],
    )
}

/// Reads `bytes` back as an EPUB with default options.
pub fn reread(bytes: Vec<u8>) -> Epub {
    Epub::read(Cursor::new(bytes)).unwrap()
}

/// The entry names of an archive in stored order,
/// alongside whether each is compressed.
pub fn entries(bytes: &[u8]) -> Vec<(String, bool)> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    (0..zip.len())
        .map(|i| {
            let file = zip.by_index(i).unwrap();
            let compressed = file.compression() != CompressionMethod::Stored;
            (file.name().to_owned(), compressed)
        })
        .collect()
}

/// The text of the entry `name` within an archive.
pub fn entry_text(bytes: &[u8], name: &str) -> String {
    use std::io::Read;

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut text = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut text).unwrap();
    text
}

/// Runs `f`, returning its result and everything logged at `WARN` or above.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (value, logs)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
