//! # folio
//! An ebook library that reads EPUB 2 and 3 archives into a flat,
//! fully loaded document model that may be edited and written back.
//!
//! ## Features
//! - [`threadsafe`](#threadsafe) (default): The lazily decoded cover image may be shared across threads.
//! - `image`: Provides [`RasterDecoder`](epub::cover::RasterDecoder) for cover images.
//!
//! ## Reading
//! Every manifest resource is loaded into memory once the archive is read,
//! keyed by its archive path (decoded, `/` separated, no leading `/`).
//! Any path given to lookup methods is normalized the same way,
//! so `OEBPS\Text\c1.xhtml` and `OEBPS/Text/c%31.xhtml` find the same resource.
//!
//! ## Strictness
//! [`EpubOpenOptions::strict`](epub::EpubOpenOptions::strict) controls
//! whether recoverable malformations fail the read or are skipped with a warning.
//! Warnings are emitted through [`tracing`](https://docs.rs/tracing).
//!
//! ## Examples
//! - Opening an EPUB and retrieving basic information:
//! ```no_run
//! # use folio::Epub;
//! # use folio::ebook::errors::EbookResult;
//! # fn main() -> EbookResult<()> {
//! let epub = Epub::open("example.epub")?;
//!
//! println!("Title: {}", epub.title());
//! println!("Author: {}", epub.author());
//!
//! for chapter in epub.table_of_contents() {
//!     println!("{} -> {}", chapter.title(), chapter.file());
//! }
//! # Ok(())
//! # }
//! ```
//! - Removing a resource and saving a copy:
//! ```no_run
//! # use folio::Epub;
//! # use folio::epub::resource::ResourceKind;
//! # use folio::ebook::errors::EbookResult;
//! # fn main() -> EbookResult<()> {
//! let mut epub = Epub::open("example.epub")?;
//!
//! // References from the spine and table of contents are removed as well
//! epub.remove_resource("OEBPS/Text/notes.xhtml", ResourceKind::Html);
//! epub.write().compression(9).save("edited.epub")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Threadsafe
//! With the `threadsafe` feature enabled (default), [`Epub`] is [`Send`] + [`Sync`].

pub mod ebook;
mod parser;
mod util;
mod writer;

pub use self::ebook::epub;
pub use self::ebook::epub::Epub;
