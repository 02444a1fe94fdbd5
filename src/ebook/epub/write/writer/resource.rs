use crate::ebook::epub::consts;
use crate::ebook::epub::package::ManifestItem;
use crate::ebook::epub::write::writer::{EpubWriter, toc};
use crate::writer::WriterResult;
use std::collections::HashSet;
use std::io::Write;

impl<W: Write> EpubWriter<'_, W> {
    /// Writes every resource payload as-is, in manifest order.
    ///
    /// Entries written beforehand (e.g., rewritten navigation documents) are skipped.
    pub(super) fn write_resources(&mut self) -> WriterResult<()> {
        let epub = self.epub;
        let mut written = [consts::MIMETYPE, consts::CONTAINER, epub.package.path()]
            .into_iter()
            .chain(toc::navigation_documents(epub).into_iter().map(|(_, path)| path))
            .collect::<HashSet<_>>();

        let manifest = epub
            .package
            .manifest()
            .iter()
            .map(ManifestItem::path)
            .collect::<Vec<_>>();
        let listed = manifest.iter().copied().collect::<HashSet<_>>();
        // Resources absent from the manifest are written last, in a stable order
        let mut unlisted = epub
            .resources
            .paths()
            .filter(|path| !listed.contains(path))
            .collect::<Vec<_>>();
        unlisted.sort_unstable();

        for path in manifest.iter().copied().chain(unlisted) {
            let Some(file) = epub.resources.get(path) else {
                tracing::warn!(path, "Skipping manifest item without content");
                continue;
            };
            if !written.insert(path) {
                continue;
            }
            self.zip.start_file(path)?;
            self.zip.write_all(file.content())?;
        }
        Ok(())
    }
}
