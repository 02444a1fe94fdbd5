pub(crate) mod errors;

use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use crate::util::uri;
use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

type Candidate = for<'a> fn(&'a str) -> Cow<'a, str>;

/// Physical entry name generators, in priority order.
///
/// The most literal form always wins; separator and
/// percent-encoding variants are only consulted afterward.
const CANDIDATES: [Candidate; 6] = [
    exact,
    unescaped,
    forward_slashes,
    unescaped_forward_slashes,
    backslashes,
    unescaped_backslashes,
];

fn exact(path: &str) -> Cow<'_, str> {
    Cow::Borrowed(path)
}

fn unescaped(path: &str) -> Cow<'_, str> {
    uri::decode(path)
}

fn forward_slashes(path: &str) -> Cow<'_, str> {
    replace_separator(path, '\\', "/")
}

fn unescaped_forward_slashes(path: &str) -> Cow<'_, str> {
    Cow::Owned(uri::decode(&forward_slashes(path)).into_owned())
}

fn backslashes(path: &str) -> Cow<'_, str> {
    replace_separator(path, '/', "\\")
}

fn unescaped_backslashes(path: &str) -> Cow<'_, str> {
    Cow::Owned(uri::decode(&backslashes(path)).into_owned())
}

fn replace_separator<'a>(path: &'a str, from: char, to: &str) -> Cow<'a, str> {
    if path.contains(from) {
        Cow::Owned(path.replace(from, to))
    } else {
        Cow::Borrowed(path)
    }
}

/// All distinct entry names `logical` may be stored under, most literal first.
pub(crate) fn candidates(logical: &str) -> Vec<Cow<'_, str>> {
    let mut names: Vec<Cow<str>> = Vec::with_capacity(CANDIDATES.len());

    for generate in CANDIDATES {
        let name = generate(logical);

        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Finds the first candidate of `logical` accepted by `lookup`.
///
/// Returns the lookup result alongside the physical name that matched.
pub(crate) fn resolve_with<T>(
    logical: &str,
    mut lookup: impl FnMut(&str) -> Option<T>,
) -> ArchiveResult<(T, String)> {
    for (i, name) in candidates(logical).into_iter().enumerate() {
        if let Some(found) = lookup(&name) {
            if i > 0 {
                tracing::warn!(logical, physical = %name, "Resolved archive entry through a variant");
            }
            return Ok((found, name.into_owned()));
        }
    }
    Err(ArchiveError::EntryNotFound {
        path: logical.to_owned(),
    })
}

/// Handle to a physical archive entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EntryHandle {
    pub(crate) index: usize,
    pub(crate) name: String,
}

/// ZIP container of an EPUB, tolerant of
/// inconsistently separated or encoded entry names.
pub(crate) struct EpubArchive<R> {
    zip: ZipArchive<R>,
}

impl EpubArchive<BufReader<File>> {
    pub(crate) fn open(path: &Path) -> ArchiveResult<Self> {
        let file = File::open(path).map_err(|error| ArchiveError::UnreadableArchive {
            source: error,
            path: Some(path.to_path_buf()),
        })?;
        Self::new(BufReader::new(file), Some(path))
    }
}

impl<R: Read + Seek> EpubArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub(crate) fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        ZipArchive::new(reader)
            .map(|zip| Self { zip })
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
                path: path.map(Path::to_path_buf),
            })
    }

    /// Resolves `logical` to the physical entry it designates.
    ///
    /// The failure retains `logical` exactly as requested.
    pub(crate) fn resolve(&self, logical: &str) -> ArchiveResult<EntryHandle> {
        resolve_with(logical, |name| self.zip.index_for_name(name))
            .map(|(index, name)| EntryHandle { index, name })
    }

    pub(crate) fn read_bytes(&mut self, logical: &str) -> ArchiveResult<Vec<u8>> {
        let handle = self.resolve(logical)?;
        let cannot_read = |source: io::Error| ArchiveError::CannotRead {
            source,
            path: handle.name.clone(),
        };
        let mut file = self
            .zip
            .by_index(handle.index)
            .map_err(|error| cannot_read(io::Error::from(error)))?;
        let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());

        file.read_to_end(&mut buf).map_err(cannot_read)?;
        Ok(buf)
    }
}
