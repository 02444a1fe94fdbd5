//! Cover image decoding for an [`Epub`](super::Epub).
//!
//! Decoding itself is delegated to a [`CoverDecoder`];
//! enabling the `image` feature provides [`RasterDecoder`].

use std::error::Error;
use std::sync::Arc;

/// Decodes the raw bytes of a cover image.
///
/// Invoked at most once per [`Epub`](super::Epub) through
/// [`Epub::cover_image`](super::Epub::cover_image).
pub trait CoverDecoder {
    /// Decodes `content`, with `path` and the declared `media_type`
    /// available as format hints.
    fn decode(
        &self,
        content: &[u8],
        path: &str,
        media_type: &str,
    ) -> Result<CoverImage, Box<dyn Error + Send + Sync>>;
}

impl<F> CoverDecoder for F
where
    F: Fn(&[u8], &str, &str) -> Result<CoverImage, Box<dyn Error + Send + Sync>>,
{
    fn decode(
        &self,
        content: &[u8],
        path: &str,
        media_type: &str,
    ) -> Result<CoverImage, Box<dyn Error + Send + Sync>> {
        self(content, path, media_type)
    }
}

/// A decoded cover image with 8-bit RGBA pixels in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CoverImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl std::fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// The cover image exists although could not be decoded.
///
/// Distinct from [`EbookError`](crate::ebook::errors::EbookError),
/// as the EPUB itself is well-formed.
#[non_exhaustive]
#[derive(thiserror::Error, Clone, Debug)]
pub enum CoverError {
    /// The [`CoverDecoder`] rejected the cover image.
    #[error("[Decode - `{path}`]: {source}")]
    Decode {
        /// The root cause of the error.
        source: Arc<dyn Error + Send + Sync>,
        /// The archive path of the cover image.
        path: String,
    },
}

#[cfg(feature = "image")]
pub use raster::RasterDecoder;

#[cfg(feature = "image")]
mod raster {
    use super::{CoverDecoder, CoverImage};
    use image::ImageFormat;
    use std::error::Error;

    /// A [`CoverDecoder`] backed by the `image` crate.
    ///
    /// The format is detected from the declared media type, then the file extension,
    /// and finally from the content itself.
    #[derive(Copy, Clone, Debug, Default)]
    pub struct RasterDecoder;

    impl CoverDecoder for RasterDecoder {
        fn decode(
            &self,
            content: &[u8],
            path: &str,
            media_type: &str,
        ) -> Result<CoverImage, Box<dyn Error + Send + Sync>> {
            let format =
                ImageFormat::from_mime_type(media_type).or_else(|| ImageFormat::from_path(path).ok());
            let image = match format {
                Some(format) => image::load_from_memory_with_format(content, format)?,
                None => image::load_from_memory(content)?,
            };
            let rgba = image.to_rgba8();

            Ok(CoverImage::new(rgba.width(), rgba.height(), rgba.into_raw()))
        }
    }
}
