//! Ordered dithering with a 4x4 Bayer threshold matrix.

#[cfg(feature = "threads")]
use rayon::prelude::*;

use crate::color::{Rgb, RgbF};
use crate::palette::Palette;

use super::{Dither, DitherOptions};

/// 4x4 Bayer index matrix, tiled over the image with its phase anchored at
/// pixel (0, 0).
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Scale applied to matrix entries, spreading them over `0..=240`.
pub const BAYER_SCALE: f32 = 16.0;

/// Offset subtracted after scaling, centering thresholds on zero.
pub const BAYER_OFFSET: f32 = 128.0;

/// Bayer ordered dithering.
///
/// Each channel is shifted by `BAYER_4X4[y % 4][x % 4] * 16 - 128`, clamped
/// to `0..=255`, and mapped to the nearest palette color. The output for a
/// pixel depends only on its own value and `(x mod 4, y mod 4)`, so rows are
/// processed in parallel when the `threads` feature is enabled.
///
/// With [`DitherOptions::preserve_exact_matches`] set (the default), a pixel
/// that is already a palette color is written out unchanged.
///
/// # Example
///
/// ```
/// use e6_dither::{Bayer, Dither, DitherOptions, Palette, Rgb};
///
/// let yellow = Rgb::new(255, 255, 0);
/// let out = Bayer.dither(&[yellow; 16], 4, 4, &Palette::E6, &DitherOptions::new());
/// assert!(out.iter().all(|&c| c == yellow));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Bayer;

impl Bayer {
    /// Threshold offset for pixel `(x, y)`.
    #[inline]
    pub fn threshold(x: usize, y: usize) -> f32 {
        BAYER_4X4[y % 4][x % 4] as f32 * BAYER_SCALE - BAYER_OFFSET
    }

    #[inline]
    fn dither_pixel(
        pixel: Rgb,
        x: usize,
        y: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Rgb {
        if options.preserve_exact_matches && palette.contains(pixel) {
            return pixel;
        }
        let t = Self::threshold(x, y);
        let shifted = (RgbF::from(pixel) + RgbF::new(t, t, t)).clamped();
        palette.nearest(shifted)
    }

    fn dither_row(
        y: usize,
        input: &[Rgb],
        output: &mut [Rgb],
        palette: &Palette,
        options: &DitherOptions,
    ) {
        for (x, (out, &pixel)) in output.iter_mut().zip(input).enumerate() {
            *out = Self::dither_pixel(pixel, x, y, palette, options);
        }
    }
}

impl Dither for Bayer {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<Rgb> {
        let mut output = vec![Rgb::default(); image.len()];
        if width == 0 || height == 0 {
            return output;
        }

        #[cfg(feature = "threads")]
        output
            .par_chunks_mut(width)
            .zip(image.par_chunks(width))
            .enumerate()
            .for_each(|(y, (out, row))| Self::dither_row(y, row, out, palette, options));

        #[cfg(not(feature = "threads"))]
        output
            .chunks_mut(width)
            .zip(image.chunks(width))
            .enumerate()
            .for_each(|(y, (out, row))| Self::dither_row(y, row, out, palette, options));

        output
    }
}
