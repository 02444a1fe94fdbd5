mod ncx;
mod xhtml;

use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::package::{ManifestItem, Package};
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::resource::Resources;
use crate::ebook::epub::toc::{Chapter, Navigation, TocFormat};
use crate::parser::ParserResult;
use crate::parser::xml::{self, ByteReader};
use crate::util::uri;

struct TocParser<'a> {
    reader: ByteReader<'a>,
    /// Archive key of the navigation document
    path: &'a str,
    /// Stack to keep track of the latest nav entry
    stack: Vec<Chapter>,
    /// Container for all root toc entries
    chapters: Vec<Chapter>,
}

impl<'a> TocParser<'a> {
    fn new(data: &'a [u8], path: &'a str) -> Self {
        let mut reader = xml::new_reader(data);
        // Navigation documents are frequently sloppy (X)HTML
        reader.config_mut().check_end_names = false;

        Self {
            reader,
            path,
            stack: Vec::new(),
            chapters: Vec::new(),
        }
    }

    fn handle_pop(&mut self) {
        let Some(chapter) = self.stack.pop() else {
            return;
        };

        // The nav element has a parent
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(chapter);
        } else {
            // The nav element does not have a parent; the root
            self.chapters.push(chapter);
        }
    }

    /// Closes any entries left open by a truncated document.
    fn finish(mut self) -> Vec<Chapter> {
        while !self.stack.is_empty() {
            self.handle_pop();
        }
        self.chapters
    }

    /// Splits `href` into the target file (an archive key) and anchor.
    ///
    /// A bare fragment (`#id`) targets the navigation document itself.
    fn target(&self, href: &str) -> (String, Option<String>) {
        let (path, fragment) = uri::split_fragment(href.trim());
        let anchor = fragment
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_owned);
        let file = if path.is_empty() {
            match anchor {
                Some(_) => self.path.to_owned(),
                None => String::new(),
            }
        } else if uri::has_scheme(path) {
            path.to_owned()
        } else {
            uri::into_key(uri::parent(self.path), path)
        };

        (file, anchor)
    }
}

impl EpubParser<'_> {
    /// Builds the table of contents from the declared navigation documents,
    /// honoring [`EpubOpenOptions::preferred_toc`](crate::epub::EpubOpenOptions::preferred_toc).
    ///
    /// A document without a usable `nav` or `navMap` is skipped in favor
    /// of the other declared form.
    pub(super) fn parse_navigation(
        &self,
        package: &Package,
        resources: &Resources,
    ) -> ParserResult<(Option<Navigation>, Vec<Chapter>)> {
        let xhtml = package.nav_item();
        let ncx = package.ncx_item();

        let formats = match self.options.preferred_toc {
            TocFormat::Xhtml => [(TocFormat::Xhtml, xhtml), (TocFormat::Ncx, ncx)],
            TocFormat::Ncx => [(TocFormat::Ncx, ncx), (TocFormat::Xhtml, xhtml)],
        };
        let mut declared = formats
            .into_iter()
            .filter_map(|(format, item)| {
                let item: &ManifestItem = item?;
                let file = resources.get(item.path())?;
                Some((format, item, file.content()))
            })
            .peekable();

        let Some(&(first_format, first_item, _)) = declared.peek() else {
            tracing::debug!("No navigation document declared");
            return Ok((None, Vec::new()));
        };

        for (format, item, data) in declared {
            if let Some(toc) = Self::parse_toc(format, item.path(), data)? {
                tracing::debug!(?format, path = item.path(), roots = toc.len(), "Parsed navigation");
                return Ok((Some(Self::navigation(format, item)), toc));
            }
            tracing::warn!(?format, path = item.path(), "No `nav` or `navMap` found");
        }

        if self.is_strict() {
            return Err(EpubError::NoTocFound.into());
        }
        Ok((Some(Self::navigation(first_format, first_item)), Vec::new()))
    }

    fn parse_toc(format: TocFormat, path: &str, data: &[u8]) -> ParserResult<Option<Vec<Chapter>>> {
        match format {
            TocFormat::Ncx => TocParser::new(data, path).parse_ncx(),
            TocFormat::Xhtml => match TocParser::new(data, path).parse_xhtml(true)? {
                Some(toc) => Ok(Some(toc)),
                // Fallback to the first `nav` without `epub:type="toc"`
                None => TocParser::new(data, path).parse_xhtml(false),
            },
        }
    }

    fn navigation(format: TocFormat, item: &ManifestItem) -> Navigation {
        Navigation {
            format,
            id: item.id.clone(),
            path: item.path.clone(),
        }
    }
}
