// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";

// Xml
pub(crate) const XMLNS: &str = "xmlns";
pub(crate) const XMLNS_DC: &str = "xmlns:dc";
pub(crate) const XMLNS_OPF: &str = "xmlns:opf";
pub(crate) const XMLNS_EPUB: &str = "xmlns:epub";

// Paths
pub(crate) const MIMETYPE: &str = "mimetype";
pub(crate) const CONTAINER: &str = "META-INF/container.xml"; // Used to identify container

// Container attributes
pub(crate) const FULL_PATH: &str = "full-path";
pub(crate) const CONTAINER_VERSION: &str = "1.0";

// Package attributes
pub(crate) const VERSION: &str = "version";
pub(crate) const UNIQUE_ID: &str = "unique-identifier";

// Metadata attributes
pub(crate) const PROPERTY: &str = "property";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const REFINES: &str = "refines";
pub(crate) const COVER: &str = "cover";

// Legacy metadata attribute keys
pub(crate) const OPF_ROLE: &str = "opf:role";
pub(crate) const OPF_FILE_AS: &str = "opf:file-as";
pub(crate) const OPF_SCHEME: &str = "opf:scheme";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const FALLBACK: &str = "fallback";
pub(crate) const PROPERTIES: &str = "properties";

// Manifest item properties
pub(crate) const COVER_IMAGE: &str = "cover-image";
pub(crate) const NAV_PROPERTY: &str = "nav";

// Spine attributes
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const TOC: &str = "toc";

// Toc attributes
pub(crate) const EPUB_TYPE: &str = "epub:type";
pub(crate) const PLAY_ORDER: &str = "playOrder"; // epub2 only
pub(crate) const NCX_VERSION: &str = "2005-1";
pub(crate) const TOC_TYPE: &str = "toc";
pub(crate) const DTB_DEPTH: &str = "dtb:depth"; // epub2 only

// Media types
pub(crate) const EPUB_TYPE_VALUE: &str = "application/epub+zip";
pub(crate) const PACKAGE_TYPE: &str = "application/oebps-package+xml";
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";

// Namespaces
pub(crate) const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";
pub(crate) const OPF_NS: &str = "http://www.idpf.org/2007/opf";
pub(crate) const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub(crate) const NCX_NS: &str = "http://www.daisy.org/z3986/2005/ncx/";
pub(crate) const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub(crate) const OPS_NS: &str = "http://www.idpf.org/2007/ops";

// Element names upon writing
pub(crate) mod tags {
    pub(crate) const CONTAINER: &str = "container";
    pub(crate) const ROOT_FILES: &str = "rootfiles";
    pub(crate) const ROOT_FILE: &str = "rootfile";

    pub(crate) const PACKAGE: &str = "package";
    pub(crate) const METADATA: &str = "metadata";
    pub(crate) const MANIFEST: &str = "manifest";
    pub(crate) const SPINE: &str = "spine";
    pub(crate) const ITEM: &str = "item";
    pub(crate) const ITEMREF: &str = "itemref";
    pub(crate) const META: &str = "meta";

    pub(crate) const DC_TITLE: &str = "dc:title";
    pub(crate) const DC_CREATOR: &str = "dc:creator";
    pub(crate) const DC_CONTRIBUTOR: &str = "dc:contributor";
    pub(crate) const DC_LANGUAGE: &str = "dc:language";
    pub(crate) const DC_IDENTIFIER: &str = "dc:identifier";
    pub(crate) const DC_PUBLISHER: &str = "dc:publisher";
    pub(crate) const DC_DESCRIPTION: &str = "dc:description";
    pub(crate) const DC_DATE: &str = "dc:date";
    pub(crate) const DC_SUBJECT: &str = "dc:subject";

    // NCX
    pub(crate) const NCX: &str = "ncx";
    pub(crate) const HEAD: &str = "head";
    pub(crate) const DOC_TITLE: &str = "docTitle";
    pub(crate) const TEXT: &str = "text";
    pub(crate) const NAV_MAP: &str = "navMap";
    pub(crate) const NAV_POINT: &str = "navPoint";
    pub(crate) const NAV_LABEL: &str = "navLabel";
    pub(crate) const CONTENT: &str = "content";

    // XHTML
    pub(crate) const HTML: &str = "html";
    pub(crate) const TITLE: &str = "title";
    pub(crate) const BODY: &str = "body";
    pub(crate) const NAV: &str = "nav";
    pub(crate) const ORDERED_LIST: &str = "ol";
    pub(crate) const LIST_ITEM: &str = "li";
    pub(crate) const ANCHOR: &str = "a";
    pub(crate) const SPAN: &str = "span";
}

// constants where calling str.as_bytes() is not possible
pub(crate) mod bytes {
    pub(crate) const ROOT_FILE: &[u8] = b"rootfile";

    pub(crate) const PACKAGE: &[u8] = b"package";
    pub(crate) const METADATA: &[u8] = b"metadata";
    pub(crate) const MANIFEST: &[u8] = b"manifest";
    pub(crate) const SPINE: &[u8] = b"spine";

    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";
    pub(crate) const META: &[u8] = b"meta";

    // Dublin Core local names
    pub(crate) const TITLE: &[u8] = b"title";
    pub(crate) const CREATOR: &[u8] = b"creator";
    pub(crate) const CONTRIBUTOR: &[u8] = b"contributor";
    pub(crate) const LANGUAGE: &[u8] = b"language";
    pub(crate) const IDENTIFIER: &[u8] = b"identifier";
    pub(crate) const PUBLISHER: &[u8] = b"publisher";
    pub(crate) const DESCRIPTION: &[u8] = b"description";
    pub(crate) const DATE: &[u8] = b"date";
    pub(crate) const SUBJECT: &[u8] = b"subject";

    pub(crate) const NAV: &[u8] = b"nav";
    pub(crate) const NAV_MAP: &[u8] = b"navMap"; // NCX

    pub(crate) const ORDERED_LIST: &[u8] = b"ol";
    pub(crate) const LIST_ITEM: &[u8] = b"li";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint"; // NCX
    pub(crate) const NAV_TARGET: &[u8] = b"navTarget"; // NCX
    pub(crate) const PAGE_TARGET: &[u8] = b"pageTarget"; // NCX

    pub(crate) const NAV_LABEL: &[u8] = b"navLabel"; // NCX
    pub(crate) const NAV_CONTENT: &[u8] = b"content"; // NCX

    pub(crate) const ANCHOR: &[u8] = b"a";
}
