//! Table of contents of an [`Epub`](super::Epub).

use crate::ebook::epub::consts;
use std::collections::VecDeque;

/// The navigation document form a table of contents originates from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TocFormat {
    /// The EPUB 2 `.ncx` (`navMap`).
    Ncx,
    /// The EPUB 3 `.xhtml` navigation document (`nav epub:type="toc"`).
    #[default]
    Xhtml,
}

/// The navigation document the table of contents was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub(crate) format: TocFormat,
    pub(crate) id: String,
    pub(crate) path: String,
}

impl Navigation {
    pub fn format(&self) -> TocFormat {
        self.format
    }

    /// The manifest id of the navigation document.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The archive path of the navigation document.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A node of the table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chapter {
    pub(crate) title: String,
    pub(crate) file: String,
    pub(crate) anchor: Option<String>,
    pub(crate) children: Vec<Chapter>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, file: impl Into<String>, anchor: Option<String>) -> Self {
        Self {
            title: title.into(),
            file: file.into(),
            anchor,
            children: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The archive path of the target, or empty when the
    /// navigation point declares no target.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The fragment identifier after `#`, if the target had one.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn children(&self) -> &[Chapter] {
        &self.children
    }

    pub fn with_children(mut self, children: Vec<Chapter>) -> Self {
        self.children = children;
        self
    }

    /// This node and all descendants in document (pre-)order.
    pub fn flatten(&self) -> impl Iterator<Item = &Chapter> {
        flatten(std::slice::from_ref(self))
    }
}

// Dropped without recursion, as navigation may be nested arbitrarily deep
impl Drop for Chapter {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);

        while let Some(mut chapter) = stack.pop() {
            stack.append(&mut chapter.children);
        }
    }
}

/// Returns `true` if a whitespace-separated `epub:type` value includes `toc`.
pub(crate) fn is_toc_type(epub_type: &str) -> bool {
    epub_type
        .split_ascii_whitespace()
        .any(|value| value == consts::TOC_TYPE)
}

/// All nodes of `chapters` in document (pre-)order.
pub fn flatten(chapters: &[Chapter]) -> impl Iterator<Item = &Chapter> {
    let mut stack = vec![chapters.iter()];

    std::iter::from_fn(move || {
        loop {
            let chapter = stack.last_mut()?.next();
            match chapter {
                Some(chapter) => {
                    stack.push(chapter.children.iter());
                    return Some(chapter);
                }
                None => {
                    stack.pop();
                }
            }
        }
    })
}

/// The depth of the deepest node (`0` when empty).
pub fn max_depth(chapters: &[Chapter]) -> usize {
    let mut max = 0;
    let mut stack = vec![(chapters, 1)];

    while let Some((level, depth)) = stack.pop() {
        for chapter in level {
            max = max.max(depth);
            stack.push((chapter.children.as_slice(), depth + 1));
        }
    }
    max
}

/// Removes every node targeting `file`, splicing its
/// surviving children into its place.
///
/// Returns the number of removed nodes.
pub(crate) fn remove_targets(chapters: &mut Vec<Chapter>, file: &str) -> usize {
    let mut removed = 0;
    let mut stack = vec![chapters];

    while let Some(level) = stack.pop() {
        let mut queue = VecDeque::from(std::mem::take(level));

        while let Some(mut chapter) = queue.pop_front() {
            if chapter.file == file {
                removed += 1;
                for child in chapter.children.drain(..).rev() {
                    queue.push_front(child);
                }
            } else {
                level.push(chapter);
            }
        }
        for chapter in level {
            stack.push(&mut chapter.children);
        }
    }
    removed
}
