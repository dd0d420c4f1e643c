//! Dithering algorithms for the six-color palette.
//!
//! Two interchangeable strategies are provided:
//!
//! - **Floyd-Steinberg** ([`FloydSteinberg`]): sequential error diffusion.
//!   Best for photographs and gradients.
//! - **Bayer** ([`Bayer`]): ordered dithering with a tiled 4x4 threshold
//!   matrix. Every pixel is independent, so rows run in parallel when the
//!   `threads` feature is on.
//!
//! Both implement the [`Dither`] trait and return a grid of exact palette
//! colors. [`DitherMethod`] selects between them (or no dithering at all)
//! from configuration.
//!
//! # Example
//!
//! ```
//! use e6_dither::{Bayer, Dither, DitherOptions, FloydSteinberg, Palette, Rgb};
//!
//! let pixels = vec![Rgb::new(128, 128, 128); 16];
//! let options = DitherOptions::new();
//!
//! let diffused = FloydSteinberg.dither(&pixels, 4, 4, &Palette::E6, &options);
//! let ordered = Bayer.dither(&pixels, 4, 4, &Palette::E6, &options);
//!
//! assert!(diffused.iter().all(|&c| Palette::E6.contains(c)));
//! assert!(ordered.iter().all(|&c| Palette::E6.contains(c)));
//! ```

mod bayer;
mod floyd_steinberg;
mod kernel;
mod options;

pub use bayer::{Bayer, BAYER_4X4, BAYER_OFFSET, BAYER_SCALE};
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::DitherOptions;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::{Rgb, RgbF};
use crate::palette::Palette;

/// Dither method selection.
///
/// `None` skips dithering; the palette validator then maps every pixel to
/// its nearest palette color, which is plain nearest-color quantization.
///
/// # Example
///
/// ```
/// use e6_dither::DitherMethod;
///
/// let method: DitherMethod = "ordered".parse().unwrap();
/// assert_eq!(method, DitherMethod::Ordered);
/// assert_eq!(DitherMethod::default(), DitherMethod::FloydSteinberg);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DitherMethod {
    /// Floyd-Steinberg error diffusion.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "floyd", alias = "error-diffusion"))]
    FloydSteinberg,

    /// Bayer 4x4 ordered dithering.
    #[cfg_attr(feature = "serde", serde(alias = "bayer"))]
    Ordered,

    /// No dithering; nearest-color mapping only.
    None,
}

impl DitherMethod {
    /// The ditherer for this method, or `None` when dithering is off.
    pub fn ditherer(self) -> Option<&'static dyn Dither> {
        match self {
            DitherMethod::FloydSteinberg => Some(&FloydSteinberg),
            DitherMethod::Ordered => Some(&Bayer),
            DitherMethod::None => None,
        }
    }

    /// Config and command-line name.
    pub fn name(self) -> &'static str {
        match self {
            DitherMethod::FloydSteinberg => "floyd-steinberg",
            DitherMethod::Ordered => "ordered",
            DitherMethod::None => "none",
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dither method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither method '{0}' (expected floyd, ordered or none)")]
pub struct ParseMethodError(pub String);

impl FromStr for DitherMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floyd" | "floyd-steinberg" | "error-diffusion" => Ok(DitherMethod::FloydSteinberg),
            "ordered" | "bayer" => Ok(DitherMethod::Ordered),
            "none" => Ok(DitherMethod::None),
            other => Err(ParseMethodError(other.to_string())),
        }
    }
}

/// Trait for dithering algorithms.
///
/// Implementors turn an RGB image into an image whose every pixel is one of
/// the palette colors.
pub trait Dither {
    /// Dither an image to exact palette colors.
    ///
    /// # Arguments
    ///
    /// * `image` - Input pixels (row-major order)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `palette` - Palette to quantize to
    /// * `options` - Dithering configuration
    ///
    /// # Returns
    ///
    /// A `Vec<Rgb>` of `width * height` palette colors in row-major order.
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<Rgb>;
}

/// Working grid of accumulated values for error diffusion.
///
/// Holds one [`RgbF`] per pixel, initialised from the input image. Every
/// addition is clamped to `0.0..=255.0` straight away, so no cell ever
/// carries more than a full channel of error forward.
#[derive(Debug)]
pub struct ErrorAccumulator {
    values: Vec<RgbF>,
    width: usize,
    height: usize,
}

impl ErrorAccumulator {
    /// Create an accumulator holding a copy of `image`.
    pub fn new(image: &[Rgb], width: usize, height: usize) -> Self {
        debug_assert_eq!(width.checked_mul(height), Some(image.len()));
        Self {
            values: image.iter().map(|&c| RgbF::from(c)).collect(),
            width,
            height,
        }
    }

    /// Accumulated value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> RgbF {
        self.values[y * self.width + x]
    }

    /// Add error to `(x, y)` and clamp the result.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, y: usize, error: RgbF) {
        if x < self.width && y < self.height {
            let cell = &mut self.values[y * self.width + x];
            *cell = (*cell + error).clamped();
        }
    }
}
