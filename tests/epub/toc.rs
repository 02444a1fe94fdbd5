use crate::epub::util::{EpubBuilder, NCX, OPF, OPF_PATH};
use folio::Epub;
use folio::ebook::errors::{EbookError, EpubError, ErrorKind, FormatError};
use folio::epub::toc::{self, TocFormat};
use wasm_bindgen_test::wasm_bindgen_test;

const EMPTY_NAV: &str =
    r#"<html xmlns="http://www.w3.org/1999/xhtml"><body><p>Empty</p></body></html>"#;

#[test]
#[wasm_bindgen_test]
fn test_xhtml_toc() {
    let epub = EpubBuilder::sample().open();
    let chapters = epub.table_of_contents();
    let navigation = epub.navigation().unwrap();

    assert_eq!(TocFormat::Xhtml, navigation.format());
    assert_eq!("nav", navigation.id());
    assert_eq!("OEBPS/nav.xhtml", navigation.path());
    assert_eq!(2, chapters.len());
    assert_eq!(3, toc::max_depth(chapters));

    #[rustfmt::skip]
    let expected = [
        ("Chapter 1", "OEBPS/Text/chap1.html", None),
        ("Section 1.1", "OEBPS/Text/chap1.html", Some("sec1")),
        ("Part 1.1.a", "OEBPS/Text/chap1.html", Some("sec1a")),
        ("Section 1.2", "OEBPS/Text/chap1.html", Some("sec2")),
        ("Chapter 2", "OEBPS/Text/chap2.html", None),
    ];
    let flattened = toc::flatten(chapters).collect::<Vec<_>>();

    assert_eq!(expected.len(), flattened.len());
    for ((title, file, anchor), chapter) in expected.into_iter().zip(flattened) {
        assert_eq!(title, chapter.title());
        assert_eq!(file, chapter.file());
        assert_eq!(anchor, chapter.anchor());
    }
}

#[test]
#[wasm_bindgen_test]
fn test_preferred_ncx() {
    let epub = EpubBuilder::sample()
        .read_with(Epub::options().preferred_toc(TocFormat::Ncx))
        .unwrap();
    let chapters = epub.table_of_contents();

    assert_eq!(TocFormat::Ncx, epub.navigation().unwrap().format());
    assert_eq!("OEBPS/toc.ncx", epub.navigation().unwrap().path());
    assert_eq!(2, chapters.len());
    assert_eq!(1, toc::max_depth(chapters));
    assert_eq!("NCX Chapter 1", chapters[0].title());
    assert_eq!("OEBPS/Text/chap1.html", chapters[0].file());
    assert_eq!("NCX Chapter 2", chapters[1].title());
}

#[test]
#[wasm_bindgen_test]
fn test_fallback_to_ncx() {
    let opf = OPF.replace(r#" properties="nav""#, "");
    let epub = EpubBuilder::sample().file(OPF_PATH, opf).open();

    assert_eq!(TocFormat::Ncx, epub.navigation().unwrap().format());
    assert_eq!("NCX Chapter 1", epub.table_of_contents()[0].title());
}

#[test]
#[wasm_bindgen_test]
fn test_no_navigation_declared() {
    let opf = OPF
        .replace(r#" properties="nav""#, "")
        .replace(r#" toc="ncx""#, "")
        .replace(
            r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#,
            "",
        );
    let epub = EpubBuilder::sample().file(OPF_PATH, opf).open();

    assert!(epub.navigation().is_none());
    assert!(epub.table_of_contents().is_empty());
}

#[test]
#[wasm_bindgen_test]
fn test_no_toc_found() {
    let builder = EpubBuilder::sample()
        .file("OEBPS/nav.xhtml", EMPTY_NAV)
        .file("OEBPS/toc.ncx", NCX.replace("navMap", "navList"));

    let error = builder.read().unwrap_err();
    assert_eq!(ErrorKind::MalformedDocument, error.kind());
    assert!(matches!(
        error,
        EbookError::Format(FormatError::Epub(EpubError::NoTocFound))
    ));

    let epub = builder.read_with(Epub::options().strict(false)).unwrap();
    assert!(epub.table_of_contents().is_empty());
    // The preferred declared document is still reported
    assert_eq!(TocFormat::Xhtml, epub.navigation().unwrap().format());
}

#[test]
#[wasm_bindgen_test]
fn test_empty_nav_falls_back_to_ncx() {
    let builder = EpubBuilder::sample().file("OEBPS/nav.xhtml", EMPTY_NAV);

    for options in [Epub::options(), Epub::options().strict(false)] {
        let epub = builder.read_with(options).unwrap();
        let navigation = epub.navigation().unwrap();

        assert_eq!(TocFormat::Ncx, navigation.format());
        assert_eq!("OEBPS/toc.ncx", navigation.path());
        assert_eq!(2, epub.table_of_contents().len());
        assert_eq!("NCX Chapter 1", epub.table_of_contents()[0].title());
    }
}

#[test]
#[wasm_bindgen_test]
fn test_deeply_nested_ncx() {
    const DEPTH: usize = 50_000;

    let mut ncx = String::from(r#"<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/"><navMap>"#);
    for i in 0..DEPTH {
        ncx.push_str(&format!(
            r#"<navPoint id="p{i}"><navLabel><text>{i}</text></navLabel><content src="Text/chap1.html"/>"#
        ));
    }
    ncx.push_str(&"</navPoint>".repeat(DEPTH));
    ncx.push_str("</navMap></ncx>");

    let epub = EpubBuilder::sample()
        .file("OEBPS/toc.ncx", ncx)
        .read_with(Epub::options().preferred_toc(TocFormat::Ncx))
        .unwrap();
    let chapters = epub.table_of_contents();

    assert_eq!(1, chapters.len());
    assert_eq!(DEPTH, toc::max_depth(chapters));
    assert_eq!(DEPTH, toc::flatten(chapters).count());
    drop(epub);
}

#[test]
#[wasm_bindgen_test]
fn test_ncx_nesting_and_headings() {
    let ncx = r#"<?xml version="1.0" encoding="UTF-8"?>
        <ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
          <navMap>
            <navPoint id="p1" playOrder="1">
              <navLabel><text>Part I</text></navLabel>
              <navPoint id="p2" playOrder="2">
                <navLabel><text>Chapter 1</text></navLabel>
                <content src="Text/chap1.html"/>
                <navPoint id="p3" playOrder="3">
                  <navLabel><text>Section 2</text></navLabel>
                  <content src="Text/chap1.html#sec2"/>
                </navPoint>
              </navPoint>
            </navPoint>
            <navPoint id="p4" playOrder="4">
              <navLabel><text>Chapter 2</text></navLabel>
              <content src="Text/chap2.html"/>
            </navPoint>
          </navMap>
        </ncx>"#;
    let epub = EpubBuilder::sample()
        .file("OEBPS/toc.ncx", ncx)
        .read_with(Epub::options().preferred_toc(TocFormat::Ncx))
        .unwrap();
    let chapters = epub.table_of_contents();

    assert_eq!(2, chapters.len());
    assert_eq!(3, toc::max_depth(chapters));

    let part = &chapters[0];
    assert_eq!("Part I", part.title());
    assert_eq!("", part.file());
    assert_eq!(None, part.anchor());

    let section = &part.children()[0].children()[0];
    assert_eq!("Section 2", section.title());
    assert_eq!("OEBPS/Text/chap1.html", section.file());
    assert_eq!(Some("sec2"), section.anchor());
}

#[test]
#[wasm_bindgen_test]
fn test_ncx_without_nav_map() {
    let ncx = NCX.replace("navMap", "navList");
    let builder = EpubBuilder::sample().file("OEBPS/toc.ncx", ncx);
    let options = || Epub::options().preferred_toc(TocFormat::Ncx);

    assert!(builder.read_with(options()).is_err());
    assert!(
        builder
            .read_with(options().strict(false))
            .unwrap()
            .table_of_contents()
            .is_empty()
    );
}
