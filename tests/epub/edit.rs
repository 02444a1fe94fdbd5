use crate::epub::util::{EpubBuilder, OPF_PATH, entries, entry_text, reread};
use folio::Epub;
use folio::epub::cover::CoverImage;
use folio::epub::resource::{ResourceKind, TextKind};
use folio::epub::toc::{self, TocFormat};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use wasm_bindgen_test::wasm_bindgen_test;

/// Asserts no part of the model refers to a missing resource or manifest item.
fn assert_no_dangling_references(epub: &Epub) {
    let package = epub.package();
    let resources = epub.resources();

    for item in package.manifest() {
        assert!(resources.contains(item.path()), "manifest: {}", item.path());
        if let Some(fallback) = item.fallback() {
            assert!(package.manifest_item(fallback).is_some(), "fallback: {fallback}");
        }
    }
    for itemref in package.spine().itemrefs() {
        assert!(package.manifest_item(itemref.idref()).is_some(), "spine: {}", itemref.idref());
    }
    if let Some(id) = package.spine().toc() {
        assert!(package.manifest_item(id).is_some(), "spine toc: {id}");
    }
    for path in epub.special_resources().html_in_reading_order() {
        assert!(resources.html().contains_key(path), "reading order: {path}");
    }
    for chapter in toc::flatten(epub.table_of_contents()) {
        let file = chapter.file();
        assert!(file.is_empty() || resources.contains(file), "toc: {file}");
    }
    if let Some(navigation) = epub.navigation() {
        assert!(resources.contains(navigation.path()));
    }
    if let Some(cover) = epub.cover_path() {
        assert!(resources.contains(cover));
    }
}

#[test]
#[wasm_bindgen_test]
fn test_remove_chapter() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.remove_resource("OEBPS/Text/chap1.html", ResourceKind::Html));
    assert!(!epub.resources().contains("OEBPS/Text/chap1.html"));
    assert!(epub.package().manifest_item("chap1").is_none());
    assert_eq!(1, epub.package().spine().itemrefs().len());
    assert_eq!(1, epub.html_in_reading_order().count());
    assert_no_dangling_references(&epub);

    // Every entry targeting the chapter is gone
    let titles = toc::flatten(epub.table_of_contents())
        .map(|chapter| chapter.title())
        .collect::<Vec<_>>();
    assert_eq!(vec!["Chapter 2"], titles);

    // Nothing dangles after writing either
    let bytes = epub.write().to_vec().unwrap();
    assert!(!entries(&bytes).iter().any(|(name, _)| name.ends_with("chap1.html")));
    assert!(!entry_text(&bytes, OPF_PATH).contains("chap1"));
    assert!(!entry_text(&bytes, "OEBPS/nav.xhtml").contains("chap1"));
    assert!(!entry_text(&bytes, "OEBPS/toc.ncx").contains("chap1"));

    let written = reread(bytes);
    assert_no_dangling_references(&written);
    assert_eq!(epub.table_of_contents(), written.table_of_contents());
    assert_eq!("Chapter 2\nFish & chips", written.to_plain_text());
}

#[test]
#[wasm_bindgen_test]
fn test_remove_promotes_children() {
    let nav = r#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
      <body>
        <nav epub:type="toc">
          <ol>
            <li><a href="Text/chap1.html">Chapter 1</a>
              <ol><li><a href="Text/chap2.html">Chapter 2</a></li></ol>
            </li>
          </ol>
        </nav>
      </body>
    </html>"#;
    let mut epub = EpubBuilder::sample().file("OEBPS/nav.xhtml", nav).open();

    assert!(epub.remove_resource("OEBPS/Text/chap1.html", ResourceKind::Html));

    let chapters = epub.table_of_contents();
    assert_eq!(1, chapters.len());
    assert_eq!("Chapter 2", chapters[0].title());
    assert!(chapters[0].children().is_empty());
}

#[test]
#[wasm_bindgen_test]
fn test_remove_absent_or_wrong_kind() {
    let mut epub = EpubBuilder::sample().open();
    let manifest = epub.package().manifest().to_vec();

    assert!(!epub.remove_resource("OEBPS/Text/missing.html", ResourceKind::Html));
    assert!(!epub.remove_resource("OEBPS/Text/chap1.html", ResourceKind::Css));
    assert_eq!(manifest, epub.package().manifest());
    assert_eq!(6, epub.resources().len());
}

#[test]
#[wasm_bindgen_test]
fn test_remove_path_variants() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.remove_resource("OEBPS\\Styles\\main%2Ecss", ResourceKind::Css));
    assert!(epub.resources().css().is_empty());
    assert!(epub.package().manifest_item("style").is_none());
}

#[test]
#[wasm_bindgen_test]
fn test_remove_cover() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.remove_resource("OEBPS/Images/cover.png", ResourceKind::Image));
    assert_eq!(None, epub.cover_path());
    assert_eq!(None, epub.metadata().meta_content("cover"));
    assert_no_dangling_references(&epub);

    let written = reread(epub.write().to_vec().unwrap());
    assert_eq!(None, written.cover_path());
    assert_no_dangling_references(&written);
}

#[test]
#[wasm_bindgen_test]
fn test_remove_navigation_document() {
    let mut epub = EpubBuilder::sample().open();
    let chapters = epub.table_of_contents().to_vec();

    assert!(epub.remove_resource("OEBPS/nav.xhtml", ResourceKind::Html));
    // The table of contents now belongs to the NCX declared by the spine
    let navigation = epub.navigation().unwrap();
    assert_eq!(TocFormat::Ncx, navigation.format());
    assert_eq!("ncx", navigation.id());
    assert_eq!("OEBPS/toc.ncx", navigation.path());
    assert_eq!(chapters, epub.table_of_contents());
    assert_no_dangling_references(&epub);

    let bytes = epub.write().to_vec().unwrap();
    let ncx = entry_text(&bytes, "OEBPS/toc.ncx");
    assert!(ncx.contains("Part 1.1.a"));
    assert!(!ncx.contains("NCX Chapter 1"));

    let written = reread(bytes);
    assert_eq!(TocFormat::Ncx, written.navigation().unwrap().format());
    assert_eq!(chapters, written.table_of_contents());
    assert_no_dangling_references(&written);
}

#[test]
#[wasm_bindgen_test]
fn test_remove_every_navigation_document() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.remove_resource("OEBPS/nav.xhtml", ResourceKind::Html));
    assert!(epub.remove_resource("OEBPS/toc.ncx", ResourceKind::Other));
    assert!(epub.navigation().is_none());
    // The model keeps the entries although nothing declares them anymore
    assert_eq!(2, epub.table_of_contents().len());
    assert_no_dangling_references(&epub);

    let written = reread(epub.write().to_vec().unwrap());
    assert!(written.navigation().is_none());
    assert!(written.table_of_contents().is_empty());
}

#[test]
#[wasm_bindgen_test]
fn test_remove_ncx() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.remove_resource("OEBPS/toc.ncx", ResourceKind::Other));
    assert_eq!(None, epub.package().spine().toc());
    // The XHTML navigation document is unaffected
    assert_eq!(TocFormat::Xhtml, epub.navigation().unwrap().format());
    assert_eq!(2, epub.table_of_contents().len());
    assert_no_dangling_references(&epub);
}

#[test]
#[wasm_bindgen_test]
fn test_add_resource() {
    let mut epub = EpubBuilder::sample().open();
    let content = b"\xFF\xD8\xFF extra".to_vec();

    let id = epub
        .add_resource("OEBPS/Images/extra.jpg", "image/jpeg", content.clone())
        .unwrap();
    assert_eq!("item-7", id);
    assert!(epub.add_resource("OEBPS/Images/extra.jpg", "image/jpeg", Vec::new()).is_none());

    let written = reread(epub.write().to_vec().unwrap());
    let item = written.package().manifest_item(&id).unwrap();

    assert_eq!("OEBPS/Images/extra.jpg", item.path());
    assert_eq!("image/jpeg", item.media_type());
    assert_eq!(content, written.resources().images()["OEBPS/Images/extra.jpg"].content());
    // Not part of the reading order
    assert_eq!(2, written.html_in_reading_order().count());
}

#[test]
#[wasm_bindgen_test]
fn test_replace_content() {
    let mut epub = EpubBuilder::sample().open();

    assert!(epub.replace_content("OEBPS/Text/chap2.html", b"<p>Replaced</p>".to_vec()));
    assert!(!epub.replace_content("OEBPS/Text/missing.html", Vec::new()));

    let chapter = epub.retrieve_text(TextKind::Html, "OEBPS/Text/chap2.html").unwrap();
    assert_eq!("<p>Replaced</p>", chapter.text());
    assert_eq!("Hello\nWorld\nReplaced", epub.to_plain_text());
}

#[test]
#[wasm_bindgen_test]
fn test_replace_cover_resets_image() {
    let mut epub = EpubBuilder::sample().open();
    let calls = AtomicUsize::new(0);
    let decoder = |content: &[u8], _: &str, _: &str| -> Result<CoverImage, Box<dyn Error + Send + Sync>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(CoverImage::new(1, 1, content.to_vec()))
    };

    epub.cover_image(&decoder).unwrap();
    assert!(epub.replace_content("OEBPS/Images/cover.png", b"new".to_vec()));

    let image = epub.cover_image(&decoder).unwrap().unwrap();
    assert_eq!(b"new", image.pixels());
    assert_eq!(2, calls.load(Ordering::SeqCst));
}
