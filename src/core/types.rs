//! Pixel data that flows through the filters.
//!
//! A [`PixelBuffer`] is a row-major grid of RGBA8 [`Pixel`]s. Its length is
//! fixed at construction: filters rewrite pixels in place but can never grow
//! or shrink the grid.

use crate::core::error::FiltererError;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single RGBA pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel. Untouched by every filter.
    pub alpha: u8,
}

impl Pixel {
    /// Create a pixel from its four channels.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Create a fully opaque pixel.
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self { red, green, blue, alpha }
    }
}

impl From<image::Rgba<u8>> for Pixel {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Pixel> for image::Rgba<u8> {
    fn from(px: Pixel) -> Self {
        image::Rgba(px.to_array())
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
    }
}

/// Mutable 2-D grid of RGBA pixels, stored row-major.
///
/// The pixel at `(x, y)` lives at index `y * width + x`.
///
/// Deserialization goes through [`PixelBuffer::from_pixels`], so a document
/// whose pixel count disagrees with its dimensions is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPixelBuffer")]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// Unchecked wire shape of a [`PixelBuffer`].
#[derive(Deserialize)]
struct RawPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl TryFrom<RawPixelBuffer> for PixelBuffer {
    type Error = FiltererError;

    fn try_from(raw: RawPixelBuffer) -> Result<Self, Self::Error> {
        Self::from_pixels(raw.width, raw.height, raw.pixels)
    }
}

impl PixelBuffer {
    /// Create a buffer of transparent black pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::default())
    }

    /// Create a buffer where every pixel equals `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; area(width, height)],
        }
    }

    /// Wrap an existing pixel vector.
    ///
    /// Fails if `pixels.len()` is not `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, FiltererError> {
        if pixels.len() != area(width, height) {
            return Err(FiltererError::BufferSizeMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Build a buffer by evaluating `f(x, y)` for every position.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        let mut pixels = Vec::with_capacity(area(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// All pixels, mutably. A slice, so the length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite the pixel at `(x, y)`. Returns `false` when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.pixels[i] = pixel;
                true
            }
            None => false,
        }
    }

    /// Mutable rows of `width` pixels each.
    ///
    /// Yields nothing for a zero-width buffer.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> {
        let width = (self.width as usize).max(1);
        self.pixels.chunks_mut(width)
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Copy pixels out of an RGBA8 image.
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|px| Pixel::from(*px)).collect(),
        }
    }

    /// Convert any decoded image to RGBA8 and copy its pixels.
    pub fn from_dynamic_image(image: &DynamicImage) -> Self {
        Self::from_rgba_image(&image.to_rgba8())
    }

    /// Copy the buffer into an RGBA8 image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|px| px.to_array()).collect();
        // Length is width * height * 4 by the buffer invariant.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(image: &RgbaImage) -> Self {
        Self::from_rgba_image(image)
    }
}

impl From<&DynamicImage> for PixelBuffer {
    fn from(image: &DynamicImage) -> Self {
        Self::from_dynamic_image(image)
    }
}

impl From<&PixelBuffer> for RgbaImage {
    fn from(buffer: &PixelBuffer) -> Self {
        buffer.to_rgba_image()
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// A filter name paired with the factor to use for one application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSetting {
    /// Key in the adjustable registry.
    #[serde(alias = "filter")]
    pub name: String,
    /// Factor overriding the filter's default.
    pub factor: i32,
}

impl FilterSetting {
    /// Create a setting.
    pub fn new(name: impl Into<String>, factor: i32) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }
}

impl<S: Into<String>> From<(S, i32)> for FilterSetting {
    fn from((name, factor): (S, i32)) -> Self {
        Self::new(name, factor)
    }
}

impl fmt::Display for FilterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.factor)
    }
}
