use crate::epub::util::{EpubBuilder, OPF, OPF_PATH, capture_warnings, opf_with};
use folio::Epub;
use folio::ebook::errors::{ArchiveError, EbookError, EpubError, ErrorKind, FormatError};
use folio::epub::cover::CoverImage;
use folio::epub::resource::ResourceKind;
use std::error::Error;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use wasm_bindgen_test::wasm_bindgen_test;

fn epub_error(error: &EbookError) -> Option<&EpubError> {
    match error {
        EbookError::Format(FormatError::Epub(error)) => Some(error),
        _ => None,
    }
}

#[test]
#[wasm_bindgen_test]
fn test_read_sample() {
    let epub = EpubBuilder::sample().open();

    assert_eq!("Sample Book", epub.title());
    assert_eq!(vec!["Jane Doe", "John Smith"], epub.authors());
    assert_eq!("Jane Doe, John Smith", epub.author());
    assert_eq!("3.0", epub.package().version());
    assert_eq!(OPF_PATH, epub.package().path());
    assert_eq!("OEBPS", epub.package().directory());
    assert_eq!(Some("OEBPS/Images/cover.png"), epub.cover_path());
}

#[test]
#[wasm_bindgen_test]
fn test_creator_refinements() {
    let epub = EpubBuilder::sample().open();
    let creators = epub.metadata().creators();

    #[rustfmt::skip]
    let expected = [
        ("Jane Doe", Some("author-1"), Some("aut"), None),
        ("John Smith", None, Some("aut"), Some("Smith, John")),
    ];

    assert_eq!(expected.len(), creators.len());
    for ((name, id, role, file_as), creator) in expected.into_iter().zip(creators) {
        assert_eq!(name, creator.name());
        assert_eq!(id, creator.id());
        assert_eq!(role, creator.role());
        assert_eq!(file_as, creator.file_as());
    }
}

#[test]
#[wasm_bindgen_test]
fn test_classified_resources() {
    let epub = EpubBuilder::sample().open();
    let resources = epub.resources();

    #[rustfmt::skip]
    let expected = [
        ("OEBPS/nav.xhtml", ResourceKind::Html),
        ("OEBPS/Text/chap1.html", ResourceKind::Html),
        ("OEBPS/Text/chap2.html", ResourceKind::Html),
        ("OEBPS/Styles/main.css", ResourceKind::Css),
        ("OEBPS/Images/cover.png", ResourceKind::Image),
        ("OEBPS/toc.ncx", ResourceKind::Other),
    ];

    assert_eq!(expected.len(), resources.len());
    for (path, kind) in expected {
        let file = resources.get(path).unwrap();
        assert_eq!(kind, file.kind(), "{path}");
        assert_eq!(path, file.file_name());
    }
    assert_eq!(3, resources.html().len());
    assert_eq!(1, resources.css().len());
    assert_eq!(1, resources.images().len());
    assert!(resources.fonts().is_empty());
    assert_eq!(1, resources.other().len());
}

#[test]
#[wasm_bindgen_test]
fn test_reading_order() {
    let epub = EpubBuilder::sample().open();
    let paths = epub
        .html_in_reading_order()
        .map(|file| file.file_name())
        .collect::<Vec<_>>();

    assert_eq!(vec!["OEBPS/Text/chap1.html", "OEBPS/Text/chap2.html"], paths);
    assert_eq!(
        epub.package().spine().itemrefs().len(),
        epub.special_resources().html_in_reading_order().len(),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_special_resources() {
    let epub = EpubBuilder::sample().open();
    let special = epub.special_resources();

    assert_eq!("META-INF/container.xml", special.ocf().file_name());
    assert_eq!(OPF_PATH, special.opf().file_name());
    assert_eq!("application/oebps-package+xml", special.opf().media_type());
    assert_eq!(OPF, special.opf().text());
}

#[test]
#[wasm_bindgen_test]
fn test_empty_title_and_no_creators() {
    let opf = OPF
        .replace("<dc:title>Sample Book</dc:title>", "<dc:title></dc:title>")
        .replace(r#"<dc:creator id="author-1">Jane Doe</dc:creator>"#, "")
        .replace(
            r#"<dc:creator opf:role="aut" opf:file-as="Smith, John">John Smith</dc:creator>"#,
            "",
        );
    let epub = EpubBuilder::sample().file(OPF_PATH, opf).open();

    assert_eq!("", epub.title());
    assert!(epub.authors().is_empty());
    assert_eq!("", epub.author());
}

#[test]
#[wasm_bindgen_test]
fn test_not_an_archive() {
    let error = Epub::read(Cursor::new(b"definitely not a zip".to_vec())).unwrap_err();

    assert_eq!(ErrorKind::MalformedDocument, error.kind());
    assert!(matches!(
        error,
        EbookError::Archive(ArchiveError::UnreadableArchive { path: None, .. })
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_missing_container() {
    let error = EpubBuilder::sample()
        .remove("META-INF/container.xml")
        .read()
        .unwrap_err();

    assert_eq!(ErrorKind::EntryNotFound, error.kind());
    assert!(matches!(
        error,
        EbookError::Archive(ArchiveError::EntryNotFound { path }) if path == "META-INF/container.xml"
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_missing_rootfile() {
    let container = r#"<?xml version="1.0"?>
        <container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
          <rootfiles/>
        </container>"#;
    let error = EpubBuilder::sample()
        .file("META-INF/container.xml", container)
        .read()
        .unwrap_err();

    assert_eq!(ErrorKind::MalformedDocument, error.kind());
    assert!(matches!(epub_error(&error), Some(EpubError::NoOpfReference)));
}

#[test]
#[wasm_bindgen_test]
fn test_missing_package() {
    let error = EpubBuilder::sample().remove(OPF_PATH).read().unwrap_err();

    assert_eq!(ErrorKind::EntryNotFound, error.kind());
}

#[test]
#[wasm_bindgen_test]
fn test_missing_manifest_entry() {
    let error = EpubBuilder::sample()
        .remove("OEBPS/Styles/main.css")
        .read()
        .unwrap_err();

    assert_eq!(ErrorKind::EntryNotFound, error.kind());
    assert!(matches!(
        error,
        EbookError::Archive(ArchiveError::EntryNotFound { path }) if path == "OEBPS/Styles/main.css"
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_dangling_spine_entries() {
    const MANIFEST: &str = r#"
        <item id="chap1" href="Text/chap1.html" media-type="application/xhtml+xml"/>
        <item id="style" href="Styles/main.css" media-type="text/css"/>"#;

    #[rustfmt::skip]
    let spines = [
        r#"<itemref idref="chap1"/><itemref idref="missing"/>"#,
        r#"<itemref idref="chap1"/><itemref idref="style"/>"#,
    ];

    for spine in spines {
        let builder = EpubBuilder::sample().file(OPF_PATH, opf_with(MANIFEST, spine));

        // Never tolerated, regardless of strictness
        for strict in [true, false] {
            let error = builder
                .read_with(Epub::options().strict(strict))
                .unwrap_err();

            assert_eq!(ErrorKind::DanglingReference, error.kind(), "{spine}");
        }
    }
}

#[test]
#[wasm_bindgen_test]
fn test_duplicate_reading_order_entries() {
    const MANIFEST: &str =
        r#"<item id="chap1" href="Text/chap1.html" media-type="application/xhtml+xml"/>"#;
    let opf = opf_with(MANIFEST, r#"<itemref idref="chap1"/><itemref idref="chap1"/>"#);
    let builder = EpubBuilder::sample().file(OPF_PATH, opf);
    let (epub, logs) = capture_warnings(|| builder.open());

    assert_eq!(2, epub.package().spine().itemrefs().len());
    assert_eq!(1, epub.html_in_reading_order().count());
    // The shorter reading order is reported
    assert!(logs.contains("duplicate spine entry"), "{logs}");
}

#[test]
#[wasm_bindgen_test]
fn test_strictness() {
    const MANIFEST: &str = r#"
        <item id="chap1" href="Text/chap1.html" media-type="application/xhtml+xml"/>
        <item id="no-href" media-type="application/xhtml+xml"/>
        <item id="chap1" href="Text/chap2.html" media-type="application/xhtml+xml"/>"#;
    let builder = EpubBuilder::sample().file(
        OPF_PATH,
        opf_with(MANIFEST, r#"<itemref idref="chap1"/><itemref/>"#),
    );

    let error = builder.read().unwrap_err();
    assert_eq!(ErrorKind::MalformedDocument, error.kind());
    assert!(matches!(
        epub_error(&error),
        Some(EpubError::MissingAttribute(_))
    ));

    // Offending entries are skipped instead
    let epub = builder.read_with(Epub::options().strict(false)).unwrap();
    let manifest = epub.package().manifest();

    assert_eq!(1, manifest.len());
    assert_eq!("OEBPS/Text/chap1.html", manifest[0].path());
    assert_eq!(1, epub.package().spine().itemrefs().len());
    assert_eq!(1, epub.html_in_reading_order().count());
}

#[test]
#[wasm_bindgen_test]
fn test_duplicate_item_id() {
    const MANIFEST: &str = r#"
        <item id="chap1" href="Text/chap1.html" media-type="application/xhtml+xml"/>
        <item id="chap1" href="Text/chap2.html" media-type="application/xhtml+xml"/>"#;
    let builder = EpubBuilder::sample().file(
        OPF_PATH,
        opf_with(MANIFEST, r#"<itemref idref="chap1"/>"#),
    );

    let error = builder.read().unwrap_err();
    assert!(matches!(
        epub_error(&error),
        Some(EpubError::DuplicateItemId(id)) if id == "chap1"
    ));

    let epub = builder.read_with(Epub::options().strict(false)).unwrap();
    assert_eq!(1, epub.package().manifest().len());
}

#[test]
#[wasm_bindgen_test]
fn test_missing_spine() {
    let opf = OPF.replace(
        &OPF[OPF.find("<spine").unwrap()..OPF.find("</spine>").unwrap() + "</spine>".len()],
        "",
    );
    let builder = EpubBuilder::sample().file(OPF_PATH, opf);

    let error = builder.read().unwrap_err();
    assert!(matches!(epub_error(&error), Some(EpubError::NoSpineFound)));

    let epub = builder.read_with(Epub::options().strict(false)).unwrap();
    assert_eq!(0, epub.html_in_reading_order().count());
    assert_eq!("", epub.to_plain_text());
}

#[test]
#[wasm_bindgen_test]
fn test_cover_by_property() {
    let opf = OPF
        .replace(r#"<meta name="cover" content="cover-image"/>"#, "")
        .replace(
            r#"media-type="image/png"/>"#,
            r#"media-type="image/png" properties="cover-image"/>"#,
        );
    let epub = EpubBuilder::sample().file(OPF_PATH, opf).open();

    assert_eq!(Some("OEBPS/Images/cover.png"), epub.cover_path());
}

fn decode_header(
    content: &[u8],
    _path: &str,
    _media_type: &str,
) -> Result<CoverImage, Box<dyn Error + Send + Sync>> {
    Ok(CoverImage::new(2, 1, content[..8].to_vec()))
}

#[test]
#[wasm_bindgen_test]
fn test_cover_image_decoded_once() {
    let epub = EpubBuilder::sample().open();
    let calls = AtomicUsize::new(0);
    let decoder = |content: &[u8], path: &str, media_type: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        decode_header(content, path, media_type)
    };

    let first = epub.cover_image(&decoder).unwrap().unwrap();
    let second = epub.cover_image(&decoder).unwrap().unwrap();

    assert_eq!(1, calls.load(Ordering::SeqCst));
    assert_eq!(first, second);
    assert_eq!((2, 1), (first.width(), first.height()));
    assert_eq!(b"\x89PNG\r\n\x1a\n", first.pixels());
}

#[test]
#[wasm_bindgen_test]
fn test_cover_image_failure_cached() {
    let epub = EpubBuilder::sample().open();
    let calls = AtomicUsize::new(0);
    let decoder = |_: &[u8], _: &str, _: &str| -> Result<CoverImage, Box<dyn Error + Send + Sync>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err("unsupported".into())
    };

    assert!(epub.cover_image(&decoder).is_err());
    assert!(epub.cover_image(&decoder).is_err());
    assert_eq!(1, calls.load(Ordering::SeqCst));
}

#[cfg(feature = "threadsafe")]
#[test]
fn test_shared_across_threads() {
    let epub = std::sync::Arc::new(EpubBuilder::sample().open());

    let handles = (0..4)
        .map(|_| {
            let epub = std::sync::Arc::clone(&epub);
            std::thread::spawn(move || {
                let image = epub.cover_image(&decode_header).unwrap().unwrap();
                (epub.title().to_owned(), image.width())
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(("Sample Book".to_owned(), 2), handle.join().unwrap());
    }
}
