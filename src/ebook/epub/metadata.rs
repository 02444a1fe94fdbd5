//! Package metadata (`<metadata>`) of an [`Epub`](super::Epub).

/// Dublin Core and `<meta>` entries of the package document,
/// each kept in declaration order.
///
/// Only what is needed to regenerate the package document is retained;
/// refinement chains are not resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub(crate) titles: Vec<String>,
    pub(crate) creators: Vec<Creator>,
    pub(crate) contributors: Vec<Creator>,
    pub(crate) languages: Vec<String>,
    pub(crate) identifiers: Vec<Identifier>,
    pub(crate) publishers: Vec<String>,
    pub(crate) descriptions: Vec<String>,
    pub(crate) dates: Vec<String>,
    pub(crate) subjects: Vec<String>,
    pub(crate) metas: Vec<Meta>,
}

impl Metadata {
    /// All `dc:title` values, including empty ones.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// All `dc:creator` entries.
    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    /// All `dc:contributor` entries.
    pub fn contributors(&self) -> &[Creator] {
        &self.contributors
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn publishers(&self) -> &[String] {
        &self.publishers
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// All `<meta>` entries, EPUB 2 (`name`/`content`) and EPUB 3 (`property`) alike.
    pub fn metas(&self) -> &[Meta] {
        &self.metas
    }

    /// The identifier referenced by the package `unique-identifier` attribute.
    pub fn identifier_by_id(&self, id: &str) -> Option<&Identifier> {
        self.identifiers
            .iter()
            .find(|identifier| identifier.id.as_deref() == Some(id))
    }

    /// The `content` of the first EPUB 2 `<meta>` entry named `name`.
    pub fn meta_content(&self, name: &str) -> Option<&str> {
        self.metas
            .iter()
            .find(|meta| meta.name.as_deref() == Some(name))
            .and_then(|meta| meta.content.as_deref())
    }
}

/// A `dc:creator` or `dc:contributor` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Creator {
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    pub(crate) role: Option<String>,
    pub(crate) file_as: Option<String>,
}

impl Creator {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The legacy `opf:role` (e.g., `aut`, `edt`).
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// The legacy `opf:file-as` sort key.
    pub fn file_as(&self) -> Option<&str> {
        self.file_as.as_deref()
    }
}

/// A `dc:identifier` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identifier {
    pub(crate) id: Option<String>,
    pub(crate) value: String,
    pub(crate) scheme: Option<String>,
}

impl Identifier {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The legacy `opf:scheme` (e.g., `ISBN`, `UUID`).
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

/// A `<meta>` entry.
///
/// EPUB 2 entries carry [`Self::name`] and [`Self::content`],
/// while EPUB 3 entries carry [`Self::property`] and [`Self::value`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) property: Option<String>,
    pub(crate) refines: Option<String>,
    pub(crate) value: String,
}

impl Meta {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn refines(&self) -> Option<&str> {
        self.refines.as_deref()
    }

    /// Text content of the element (empty for EPUB 2 entries).
    pub fn value(&self) -> &str {
        &self.value
    }
}
