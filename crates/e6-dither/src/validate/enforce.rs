#[cfg(feature = "threads")]
use rayon::prelude::*;

use crate::color::{Rgb, RgbF};
use crate::palette::Palette;

/// Replace every pixel that is not exactly a palette color with its nearest
/// palette color.
///
/// Returns the number of pixels that were corrected. Running it a second
/// time corrects nothing, and a palette-exact image is left untouched.
pub fn enforce(pixels: &mut [Rgb], palette: &Palette) -> usize {
    let fix = |pixel: &mut Rgb| {
        if palette.contains(*pixel) {
            0
        } else {
            *pixel = palette.nearest(RgbF::from(*pixel));
            1
        }
    };

    #[cfg(feature = "threads")]
    let corrected: usize = pixels.par_iter_mut().map(fix).sum();

    #[cfg(not(feature = "threads"))]
    let corrected: usize = pixels.iter_mut().map(fix).sum();

    corrected
}
