//! Decoding of image file bytes into RGBA8 bitmaps.

use std::fmt;

/// Decoded RGBA8 pixel data.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Turns raw file contents into a displayable bitmap.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, String>;
}

/// Decoder backed by the `image` crate, guessing the format from the bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RgbaDecoder;

impl ImageDecoder for RgbaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, String> {
        let image = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(DecodedImage {
            data: rgba.into_raw(),
            width,
            height,
        })
    }
}
