//! Typed resource collections of an [`Epub`](super::Epub).

use crate::util::str::StrExt;
use crate::util::utf8;
use std::borrow::Cow;
use std::collections::HashMap;

/// The category a resource is classified into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// (X)HTML markup.
    Html,
    /// Stylesheets.
    Css,
    Image,
    Font,
    /// Anything else, such as the NCX, SMIL overlays, or audio.
    Other,
}

impl ResourceKind {
    /// Classifies a resource by its declared media type,
    /// consulting the extension of `path` only when the media type
    /// is absent or `application/octet-stream`.
    ///
    /// # Examples
    /// ```
    /// # use folio::epub::resource::ResourceKind;
    /// assert_eq!(ResourceKind::Html, ResourceKind::classify("application/xhtml+xml", "c1.xhtml"));
    /// assert_eq!(ResourceKind::Font, ResourceKind::classify("application/vnd.ms-opentype", "a.otf"));
    /// assert_eq!(ResourceKind::Image, ResourceKind::classify("", "images/cover.JPG"));
    /// assert_eq!(ResourceKind::Other, ResourceKind::classify("application/x-dtbncx+xml", "toc.ncx"));
    /// ```
    pub fn classify(media_type: &str, path: &str) -> Self {
        let media_type = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match media_type.as_str() {
            "" | "application/octet-stream" => Self::from_extension(path),
            "application/xhtml+xml" | "text/html" => Self::Html,
            "text/css" => Self::Css,
            "application/vnd.ms-opentype" | "application/x-font-ttf" | "application/x-font-otf" => {
                Self::Font
            }
            other if other.starts_with("image/") => Self::Image,
            other if other.starts_with("font/") || other.starts_with("application/font-") => {
                Self::Font
            }
            _ => Self::Other,
        }
    }

    fn from_extension(path: &str) -> Self {
        const KINDS: [(ResourceKind, &[&str]); 4] = [
            (ResourceKind::Html, &[".xhtml", ".html", ".htm"]),
            (ResourceKind::Css, &[".css"]),
            (
                ResourceKind::Image,
                &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".bmp"],
            ),
            (ResourceKind::Font, &[".ttf", ".otf", ".woff", ".woff2"]),
        ];

        KINDS
            .into_iter()
            .find(|(_, extensions)| extensions.iter().any(|ext| path.ends_with_ignore_case(ext)))
            .map_or(Self::Other, |(kind, _)| kind)
    }

    /// Whether resources of this kind are [`TextContentFile`]s.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Html | Self::Css)
    }
}

/// The textual resource categories; see [`Epub::retrieve_text`](super::Epub::retrieve_text).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextKind {
    Html,
    Css,
}

impl From<TextKind> for ResourceKind {
    fn from(kind: TextKind) -> Self {
        match kind {
            TextKind::Html => Self::Html,
            TextKind::Css => Self::Css,
        }
    }
}

macro_rules! content_file {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name {
            pub(crate) file_name: String,
            pub(crate) kind: ResourceKind,
            pub(crate) media_type: String,
            pub(crate) content: Vec<u8>,
        }

        impl $name {
            pub(crate) fn new(
                file_name: impl Into<String>,
                kind: ResourceKind,
                media_type: impl Into<String>,
                content: Vec<u8>,
            ) -> Self {
                Self {
                    file_name: file_name.into(),
                    kind,
                    media_type: media_type.into(),
                    content,
                }
            }

            /// The archive path of this file.
            pub fn file_name(&self) -> &str {
                &self.file_name
            }

            pub fn kind(&self) -> ResourceKind {
                self.kind
            }

            /// The declared media type (e.g., `application/xhtml+xml`).
            pub fn media_type(&self) -> &str {
                &self.media_type
            }

            /// The raw payload.
            pub fn content(&self) -> &[u8] {
                &self.content
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("file_name", &self.file_name)
                    .field("kind", &self.kind)
                    .field("media_type", &self.media_type)
                    .field("len", &self.content.len())
                    .finish()
            }
        }
    };
}

content_file! {
    /// A textual resource (markup or stylesheet).
    TextContentFile
}

content_file! {
    /// An opaque binary resource (image, font, or other).
    ByteContentFile
}

impl TextContentFile {
    /// The payload decoded as text.
    ///
    /// The view is always derived from [`Self::content`]:
    /// UTF-16 is honored when a byte order mark is present, otherwise UTF-8
    /// is assumed and invalid sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        utf8::to_utf8_str(&self.content)
    }
}

/// A borrowed resource of either content variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentFile<'a> {
    Text(&'a TextContentFile),
    Bytes(&'a ByteContentFile),
}

impl<'a> ContentFile<'a> {
    pub fn file_name(&self) -> &'a str {
        match *self {
            Self::Text(file) => file.file_name(),
            Self::Bytes(file) => file.file_name(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match *self {
            Self::Text(file) => file.kind(),
            Self::Bytes(file) => file.kind(),
        }
    }

    pub fn media_type(&self) -> &'a str {
        match *self {
            Self::Text(file) => file.media_type(),
            Self::Bytes(file) => file.media_type(),
        }
    }

    pub fn content(&self) -> &'a [u8] {
        match *self {
            Self::Text(file) => file.content(),
            Self::Bytes(file) => file.content(),
        }
    }

    pub fn as_text(&self) -> Option<&'a TextContentFile> {
        match *self {
            Self::Text(file) => Some(file),
            Self::Bytes(_) => None,
        }
    }
}

/// All manifest resources, keyed by archive path and split by [`ResourceKind`].
///
/// A path appears in at most one mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resources {
    pub(crate) html: HashMap<String, TextContentFile>,
    pub(crate) css: HashMap<String, TextContentFile>,
    pub(crate) images: HashMap<String, ByteContentFile>,
    pub(crate) fonts: HashMap<String, ByteContentFile>,
    pub(crate) other: HashMap<String, ByteContentFile>,
}

impl Resources {
    pub fn html(&self) -> &HashMap<String, TextContentFile> {
        &self.html
    }

    pub fn css(&self) -> &HashMap<String, TextContentFile> {
        &self.css
    }

    pub fn images(&self) -> &HashMap<String, ByteContentFile> {
        &self.images
    }

    pub fn fonts(&self) -> &HashMap<String, ByteContentFile> {
        &self.fonts
    }

    pub fn other(&self) -> &HashMap<String, ByteContentFile> {
        &self.other
    }

    /// The resource at `path` from whichever mapping holds it.
    pub fn get(&self, path: &str) -> Option<ContentFile<'_>> {
        self.html
            .get(path)
            .or_else(|| self.css.get(path))
            .map(ContentFile::Text)
            .or_else(|| {
                [&self.images, &self.fonts, &self.other]
                    .into_iter()
                    .find_map(|map| map.get(path))
                    .map(ContentFile::Bytes)
            })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// The total number of resources across all mappings.
    pub fn len(&self) -> usize {
        self.html.len() + self.css.len() + self.images.len() + self.fonts.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All resource paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.html
            .keys()
            .chain(self.css.keys())
            .chain(self.images.keys())
            .chain(self.fonts.keys())
            .chain(self.other.keys())
            .map(String::as_str)
    }

    pub(crate) fn text(&self, kind: TextKind) -> &HashMap<String, TextContentFile> {
        match kind {
            TextKind::Html => &self.html,
            TextKind::Css => &self.css,
        }
    }

    /// Inserts a resource into the mapping of `kind`.
    pub(crate) fn insert(
        &mut self,
        path: String,
        kind: ResourceKind,
        media_type: &str,
        content: Vec<u8>,
    ) {
        let key = path.clone();

        match kind {
            ResourceKind::Html => {
                let file = TextContentFile::new(path, kind, media_type, content);
                self.html.insert(key, file);
            }
            ResourceKind::Css => {
                let file = TextContentFile::new(path, kind, media_type, content);
                self.css.insert(key, file);
            }
            ResourceKind::Image => {
                let file = ByteContentFile::new(path, kind, media_type, content);
                self.images.insert(key, file);
            }
            ResourceKind::Font => {
                let file = ByteContentFile::new(path, kind, media_type, content);
                self.fonts.insert(key, file);
            }
            ResourceKind::Other => {
                let file = ByteContentFile::new(path, kind, media_type, content);
                self.other.insert(key, file);
            }
        }
    }

    /// Removes `path` from the mapping of `kind` only.
    pub(crate) fn remove(&mut self, path: &str, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Html => self.html.remove(path).is_some(),
            ResourceKind::Css => self.css.remove(path).is_some(),
            ResourceKind::Image => self.images.remove(path).is_some(),
            ResourceKind::Font => self.fonts.remove(path).is_some(),
            ResourceKind::Other => self.other.remove(path).is_some(),
        }
    }

    /// Swaps the payload of `path`, returning `false` if absent.
    pub(crate) fn replace_content(&mut self, path: &str, content: Vec<u8>) -> bool {
        if let Some(file) = self.html.get_mut(path).or_else(|| self.css.get_mut(path)) {
            file.content = content;
            return true;
        }
        match [&mut self.images, &mut self.fonts, &mut self.other]
            .into_iter()
            .find_map(|map| map.get_mut(path))
        {
            Some(file) => {
                file.content = content;
                true
            }
            None => false,
        }
    }
}

/// Resources that are not manifest items, alongside the reading order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialResources {
    pub(crate) ocf: TextContentFile,
    pub(crate) opf: TextContentFile,
    pub(crate) html_in_reading_order: Vec<String>,
}

impl SpecialResources {
    /// `META-INF/container.xml` as read.
    pub fn ocf(&self) -> &TextContentFile {
        &self.ocf
    }

    /// The package document as read.
    ///
    /// Written output regenerates the package document from
    /// [`Package`](super::package::Package) instead.
    pub fn opf(&self) -> &TextContentFile {
        &self.opf
    }

    /// Paths of the (X)HTML resources in spine order, without duplicates.
    ///
    /// Each path is a key of [`Resources::html`].
    pub fn html_in_reading_order(&self) -> &[String] {
        &self.html_in_reading_order
    }
}
