//! Decoded exemplar pixel buffers and in-memory image interop

use crate::io::error::{Result, invalid_source};

/// Bytes per RGBA pixel in exemplar and display buffers
pub const PIXEL_STRIDE: usize = 4;

/// A decoded RGBA exemplar image
///
/// The solver consumes pixel data that the host has already decoded; this
/// type only validates the buffer shape and answers wrapped pixel reads.
/// Tile extraction treats the exemplar as a torus, so reads past either edge
/// wrap to the opposite side.
#[derive(Clone, Debug)]
pub struct Exemplar {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Exemplar {
    /// Wrap a raw RGBA buffer (4 bytes per pixel, row-major)
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if either dimension is zero or the buffer
    /// length doesn't match `width * height * 4`.
    pub fn from_rgba8(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_source(&format!(
                "exemplar dimensions {width}x{height} must be nonzero"
            )));
        }

        let expected = width * height * PIXEL_STRIDE;
        if data.len() != expected {
            return Err(invalid_source(&format!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy pixel data out of a decoded `image` buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the image has a zero dimension.
    pub fn from_image(image: &image::RgbaImage) -> Result<Self> {
        Self::from_rgba8(
            image.width() as usize,
            image.height() as usize,
            image.as_raw().clone(),
        )
    }

    /// Convert any decoded `image` representation into an exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the image has a zero dimension.
    pub fn from_dynamic(image: &image::DynamicImage) -> Result<Self> {
        Self::from_image(&image.to_rgba8())
    }

    /// Exemplar width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Exemplar height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// RGBA pixel at (x, y) with toroidal wraparound
    pub fn pixel_wrapped(&self, x: usize, y: usize) -> [u8; 4] {
        let wrapped_x = x % self.width;
        let wrapped_y = y % self.height;
        let offset = (wrapped_y * self.width + wrapped_x) * PIXEL_STRIDE;

        self.data
            .get(offset..offset + PIXEL_STRIDE)
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
            .unwrap_or([0, 0, 0, 0])
    }
}
