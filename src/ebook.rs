//! Core [`Epub`](epub::Epub) module and supporting types.
//!
//! - [`epub`]: The EPUB 2 and 3 document model.
//! - [`errors`]: Error types shared by reading and writing.

pub(crate) mod archive;
pub mod epub;
pub mod errors;
