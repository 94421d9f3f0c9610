//! Color adjustment filters: brightness, contrast, grayscale and sepia.
//!
//! All filters are point-wise integer transforms over the RGB channels. Each
//! result is clamped to `[0, 255]` before it is stored, and alpha is never
//! read or written. Arithmetic runs in `i64` so no factor can overflow.

use crate::core::error::FiltererError;
use crate::core::types::{Pixel, PixelBuffer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mid-gray pivot used by the contrast-style scaling.
const MID_GRAY: i64 = 128;

/// Sepia weights, scaled by 1000. Rows produce red, green, blue.
const SEPIA_MATRIX: [[i64; 3]; 3] = [
    [393, 769, 189],
    [349, 686, 168],
    [272, 534, 131],
];

/// The four filter kinds, without a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    #[serde(alias = "brightness")]
    Brightness,
    #[serde(alias = "contrast")]
    Contrast,
    #[serde(alias = "grayscale")]
    Grayscale,
    #[serde(alias = "sepia")]
    Sepia,
}

impl FilterKind {
    /// Every kind, in registry order.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Brightness,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Contrast,
    ];

    /// Name used as the adjustable-registry key.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Brightness => "Brightness",
            FilterKind::Contrast => "Contrast",
            FilterKind::Grayscale => "Grayscale",
            FilterKind::Sepia => "Sepia",
        }
    }

    /// Factor used when none is given.
    pub fn default_factor(&self) -> i32 {
        match self {
            FilterKind::Brightness => 0,
            FilterKind::Contrast | FilterKind::Grayscale | FilterKind::Sepia => 1,
        }
    }

    /// Human readable description of what the factor does.
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::Brightness => "Add the factor to every color channel",
            FilterKind::Contrast => "Scale each channel's distance from mid-gray by the factor",
            FilterKind::Grayscale => "Average the channels, then scale the gray level from mid-gray by the factor",
            FilterKind::Sepia => "Apply the sepia tone matrix, then scale each channel from mid-gray by the factor",
        }
    }

    /// Build a filter of this kind.
    pub fn with_factor(self, factor: i32) -> Filter {
        match self {
            FilterKind::Brightness => Filter::Brightness(factor),
            FilterKind::Contrast => Filter::Contrast(factor),
            FilterKind::Grayscale => Filter::Grayscale(factor),
            FilterKind::Sepia => Filter::Sepia(factor),
        }
    }

    /// Build a filter of this kind with its default factor.
    pub fn with_default_factor(self) -> Filter {
        self.with_factor(self.default_factor())
    }

    fn pixel_op(&self) -> PixelOp {
        match self {
            FilterKind::Brightness => brightness_pixel,
            FilterKind::Contrast => contrast_pixel,
            FilterKind::Grayscale => grayscale_pixel,
            FilterKind::Sepia => sepia_pixel,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FiltererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FiltererError::UnknownFilterKind(s.to_string()))
    }
}

/// How a single filter walks the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One pass in row-major order on the calling thread.
    #[default]
    Sequential,
    /// Rows are split across the rayon pool.
    Parallel,
}

/// A color filter and the factor it was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "factor")]
pub enum Filter {
    /// Signed offset added to each channel.
    Brightness(i32),
    /// Contrast ratio around mid-gray.
    Contrast(i32),
    /// Intensity applied to the averaged gray level.
    Grayscale(i32),
    /// Intensity applied after the sepia matrix.
    Sepia(i32),
}

impl Filter {
    /// Kind of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Brightness(_) => FilterKind::Brightness,
            Filter::Contrast(_) => FilterKind::Contrast,
            Filter::Grayscale(_) => FilterKind::Grayscale,
            Filter::Sepia(_) => FilterKind::Sepia,
        }
    }

    /// Configured factor.
    pub fn factor(&self) -> i32 {
        match *self {
            Filter::Brightness(f) | Filter::Contrast(f) | Filter::Grayscale(f) | Filter::Sepia(f) => f,
        }
    }

    /// Apply the filter in place on the calling thread.
    ///
    /// `factor` overrides the configured factor for this call only.
    pub fn apply<'a>(&self, buffer: &'a mut PixelBuffer, factor: Option<i32>) -> &'a mut PixelBuffer {
        self.apply_with(buffer, factor, Execution::Sequential)
    }

    /// Apply the filter in place using the given execution strategy.
    ///
    /// Both strategies produce identical pixels.
    pub fn apply_with<'a>(
        &self,
        buffer: &'a mut PixelBuffer,
        factor: Option<i32>,
        execution: Execution,
    ) -> &'a mut PixelBuffer {
        let factor = i64::from(factor.unwrap_or_else(|| self.factor()));
        let op = self.kind().pixel_op();

        match execution {
            Execution::Sequential => {
                for pixel in buffer.pixels_mut() {
                    op(pixel, factor);
                }
            }
            Execution::Parallel => {
                let width = (buffer.width() as usize).max(1);
                buffer.pixels_mut().par_chunks_mut(width).for_each(|row| {
                    for pixel in row {
                        op(pixel, factor);
                    }
                });
            }
        }

        buffer
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.factor())
    }
}

// ============================================================================
// Per-pixel transforms
// ============================================================================

type PixelOp = fn(&mut Pixel, i64);

#[inline]
fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline]
fn scale_from_mid(value: i64, factor: i64) -> i64 {
    factor * (value - MID_GRAY) + MID_GRAY
}

fn brightness_pixel(pixel: &mut Pixel, offset: i64) {
    pixel.red = clamp_channel(i64::from(pixel.red) + offset);
    pixel.green = clamp_channel(i64::from(pixel.green) + offset);
    pixel.blue = clamp_channel(i64::from(pixel.blue) + offset);
}

fn contrast_pixel(pixel: &mut Pixel, ratio: i64) {
    pixel.red = clamp_channel(scale_from_mid(i64::from(pixel.red), ratio));
    pixel.green = clamp_channel(scale_from_mid(i64::from(pixel.green), ratio));
    pixel.blue = clamp_channel(scale_from_mid(i64::from(pixel.blue), ratio));
}

fn grayscale_pixel(pixel: &mut Pixel, intensity: i64) {
    let sum = i64::from(pixel.red) + i64::from(pixel.green) + i64::from(pixel.blue);
    let gray = clamp_channel(scale_from_mid(sum / 3, intensity));
    pixel.red = gray;
    pixel.green = gray;
    pixel.blue = gray;
}

fn sepia_pixel(pixel: &mut Pixel, intensity: i64) {
    // Every row reads the original channels.
    let rgb = [
        i64::from(pixel.red),
        i64::from(pixel.green),
        i64::from(pixel.blue),
    ];
    let [red, green, blue] = SEPIA_MATRIX.map(|weights| {
        let weighted = (weights[0] * rgb[0] + weights[1] * rgb[1] + weights[2] * rgb[2]) / 1000;
        clamp_channel(scale_from_mid(weighted, intensity))
    });
    pixel.red = red;
    pixel.green = green;
    pixel.blue = blue;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single(pixel: Pixel) -> PixelBuffer {
        PixelBuffer::filled(1, 1, pixel)
    }

    fn apply_one(filter: Filter, pixel: Pixel) -> Pixel {
        let mut buffer = single(pixel);
        filter.apply(&mut buffer, None);
        buffer.pixels()[0]
    }

    #[test]
    fn test_sepia_reference_pixel() {
        let out = apply_one(Filter::Sepia(1), Pixel::new(100, 150, 200, 255));
        assert_eq!(out, Pixel::new(192, 171, 133, 255));
    }

    #[test]
    fn test_sepia_saturates_on_white() {
        let out = apply_one(Filter::Sepia(1), Pixel::opaque(255, 255, 255));
        // 1351 * 255 / 1000 = 344 -> 255, 1203 -> 306 -> 255, 937 -> 238
        assert_eq!(out, Pixel::opaque(255, 255, 238));
    }

    #[test]
    fn test_sepia_intensity_scales_after_matrix() {
        let out = apply_one(Filter::Sepia(2), Pixel::new(100, 150, 200, 255));
        // 192 -> 256 -> 255, 171 -> 214, 133 -> 138
        assert_eq!(out, Pixel::new(255, 214, 138, 255));
    }

    #[test]
    fn test_brightness_offsets_and_clamps() {
        assert_eq!(
            apply_one(Filter::Brightness(55), Pixel::new(10, 200, 250, 7)),
            Pixel::new(65, 255, 255, 7)
        );
        assert_eq!(
            apply_one(Filter::Brightness(-40), Pixel::new(10, 200, 250, 7)),
            Pixel::new(0, 160, 210, 7)
        );
    }

    #[test]
    fn test_contrast_scales_from_mid_gray() {
        assert_eq!(
            apply_one(Filter::Contrast(3), Pixel::opaque(100, 128, 150)),
            Pixel::opaque(44, 128, 194)
        );
        // Negative ratio inverts around mid-gray.
        assert_eq!(
            apply_one(Filter::Contrast(-1), Pixel::opaque(100, 128, 0)),
            Pixel::opaque(156, 128, 255)
        );
    }

    #[test]
    fn test_grayscale_truncates_average() {
        // (10 + 20 + 31) / 3 = 20
        assert_eq!(
            apply_one(Filter::Grayscale(1), Pixel::new(10, 20, 31, 99)),
            Pixel::new(20, 20, 20, 99)
        );
        // 20 scaled by 2 from mid-gray: 2 * -108 + 128 = -88 -> 0
        assert_eq!(
            apply_one(Filter::Grayscale(2), Pixel::new(10, 20, 31, 99)),
            Pixel::new(0, 0, 0, 99)
        );
    }

    #[test]
    fn test_factor_override() {
        let filter = Filter::Brightness(100);
        let mut buffer = single(Pixel::opaque(50, 50, 50));
        filter.apply(&mut buffer, Some(-10));
        assert_eq!(buffer.pixels()[0], Pixel::opaque(40, 40, 40));
        assert_eq!(filter.factor(), 100);
    }

    #[test]
    fn test_identity_factors() {
        let pixel = Pixel::new(3, 140, 251, 12);
        assert_eq!(apply_one(Filter::Brightness(0), pixel), pixel);
        assert_eq!(apply_one(Filter::Contrast(1), pixel), pixel);
    }

    #[test]
    fn test_order_matters() {
        let pixel = Pixel::opaque(100, 100, 100);

        let mut first = single(pixel);
        Filter::Brightness(20).apply(&mut first, None);
        Filter::Contrast(2).apply(&mut first, None);

        let mut second = single(pixel);
        Filter::Contrast(2).apply(&mut second, None);
        Filter::Brightness(20).apply(&mut second, None);

        assert_eq!(first.pixels()[0], Pixel::opaque(112, 112, 112));
        assert_eq!(second.pixels()[0], Pixel::opaque(92, 92, 92));
    }

    #[test]
    fn test_apply_returns_same_buffer_for_chaining() {
        let mut buffer = single(Pixel::opaque(100, 100, 100));
        Filter::Brightness(20)
            .apply(&mut buffer, None)
            .set(0, 0, Pixel::opaque(1, 2, 3));
        assert_eq!(buffer.pixels()[0], Pixel::opaque(1, 2, 3));
    }

    #[test]
    fn test_empty_buffer_is_fine() {
        let mut buffer = PixelBuffer::new(0, 0);
        Filter::Sepia(1).apply_with(&mut buffer, None, Execution::Parallel);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("sepia".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
        assert_eq!(" Contrast ".parse::<FilterKind>().unwrap(), FilterKind::Contrast);
        assert!(matches!(
            "blur".parse::<FilterKind>(),
            Err(FiltererError::UnknownFilterKind(_))
        ));
    }

    #[test]
    fn test_default_factors() {
        assert_eq!(FilterKind::Brightness.with_default_factor(), Filter::Brightness(0));
        assert_eq!(FilterKind::Contrast.with_default_factor(), Filter::Contrast(1));
        assert_eq!(FilterKind::Grayscale.with_default_factor(), Filter::Grayscale(1));
        assert_eq!(FilterKind::Sepia.with_default_factor(), Filter::Sepia(1));
    }

    #[test]
    fn test_filter_serde_shape() {
        let json = serde_json::to_string(&Filter::Contrast(3)).unwrap();
        assert_eq!(json, r#"{"kind":"Contrast","factor":3}"#);
    }

    fn any_filter() -> impl Strategy<Value = Filter> {
        let factor = prop_oneof![-1000i32..=1000, Just(i32::MIN), Just(i32::MAX)];
        (0usize..4, factor).prop_map(|(k, f)| FilterKind::ALL[k].with_factor(f))
    }

    fn any_buffer() -> impl Strategy<Value = PixelBuffer> {
        (1u32..8, 1u32..8).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<[u8; 4]>(), (w * h) as usize).prop_map(move |raw| {
                let pixels = raw.into_iter().map(Pixel::from).collect();
                PixelBuffer::from_pixels(w, h, pixels).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_alpha_untouched(filter in any_filter(), buffer in any_buffer()) {
            let before: Vec<u8> = buffer.pixels().iter().map(|p| p.alpha).collect();
            let mut buffer = buffer;
            filter.apply(&mut buffer, None);
            let after: Vec<u8> = buffer.pixels().iter().map(|p| p.alpha).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_brightness_zero_is_identity(buffer in any_buffer()) {
            let mut out = buffer.clone();
            Filter::Brightness(0).apply(&mut out, None);
            prop_assert_eq!(out, buffer);
        }

        #[test]
        fn prop_unit_intensity_keeps_weighted_value(buffer in any_buffer()) {
            let mut out = buffer.clone();
            Filter::Grayscale(1).apply(&mut out, None);
            for (src, dst) in buffer.pixels().iter().zip(out.pixels()) {
                let avg = (u32::from(src.red) + u32::from(src.green) + u32::from(src.blue)) / 3;
                prop_assert_eq!(u32::from(dst.red), avg);
            }
        }

        #[test]
        fn prop_parallel_matches_sequential(filter in any_filter(), buffer in any_buffer()) {
            let mut seq = buffer.clone();
            let mut par = buffer;
            filter.apply_with(&mut seq, None, Execution::Sequential);
            filter.apply_with(&mut par, None, Execution::Parallel);
            prop_assert_eq!(seq, par);
        }

        #[test]
        fn prop_length_preserved(filter in any_filter(), buffer in any_buffer()) {
            let len = buffer.len();
            let mut buffer = buffer;
            filter.apply(&mut buffer, None);
            prop_assert_eq!(buffer.len(), len);
        }
    }
}
