//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Pixels are visited in raster order (row 0 left to right, then row 1, ...)
//! and each pixel's quantization error is pushed onto the four neighbors
//! that have not been visited yet. Every decision depends on all error
//! diffused before it, so the scan is strictly sequential.

use crate::color::{Rgb, RgbF};
use crate::palette::Palette;

use super::{Dither, DitherOptions, ErrorAccumulator, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// For each pixel `(x, y)`:
///
/// 1. Clamp the accumulated value to `0..=255`.
/// 2. Map it to the nearest palette color and write that color out.
/// 3. Compute the signed per-channel error `accumulated - mapped`.
/// 4. Diffuse the error, clamping each target cell after its addition:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Neighbors outside the image drop their share; nothing wraps around.
///
/// Output is deterministic: the same input always yields the same bytes.
///
/// # Example
///
/// ```
/// use e6_dither::{Dither, DitherOptions, FloydSteinberg, Palette, Rgb};
///
/// let black = Rgb::new(0, 0, 0);
/// let white = Rgb::new(255, 255, 255);
/// let checker = vec![black, white, white, black];
///
/// let out = FloydSteinberg.dither(&checker, 2, 2, &Palette::E6, &DitherOptions::new());
/// assert_eq!(out, checker);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        _options: &DitherOptions,
    ) -> Vec<Rgb> {
        let kernel = &FLOYD_STEINBERG;
        let divisor = kernel.divisor as f32;

        let mut accumulator = ErrorAccumulator::new(image, width, height);
        let mut output = vec![Rgb::default(); image.len()];

        for y in 0..height {
            for x in 0..width {
                let pixel = accumulator.get(x, y).clamped();

                let mapped = palette.nearest(pixel);
                output[y * width + x] = mapped;

                let error = pixel - RgbF::from(mapped);

                for &(dx, dy, weight) in kernel.entries {
                    let nx = x as i64 + dx as i64;
                    if nx < 0 {
                        continue;
                    }
                    accumulator.add_error(
                        nx as usize,
                        y + dy as usize,
                        error * (weight as f32 / divisor),
                    );
                }
            }
        }

        output
    }
}
