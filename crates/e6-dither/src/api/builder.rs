//! E6Converter builder -- the primary ergonomic entry point for the crate.
//!
//! [`E6Converter`] wraps the conversion pipeline with fluent configuration:
//! optimizer, ditherer, validator.

use tracing::debug;

use crate::color::Rgb;
use crate::dither::{DitherMethod, DitherOptions};
use crate::optimize::{ColorOptimizer, OptimizerOptions};
use crate::output::ConvertedImage;
use crate::palette::Palette;
use crate::validate::{check_compatibility, enforce};

use super::DitherError;

/// High-level conversion builder for six-color e-ink panels.
///
/// # Pipeline
///
/// 1. **Optimize** (optional, on by default): [`ColorOptimizer`] saturation push
///    and hue snap.
/// 2. **Dither**: Floyd-Steinberg (default), Bayer ordered, or none.
/// 3. **Validate**: every pixel not exactly in the palette is replaced
///    with its nearest palette color. Always runs.
/// 4. **Strict check** (optional): the result is scanned once more and any
///    remaining non-palette pixel fails the conversion.
///
/// # Design
///
/// - Constructor requires [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self` so the builder is reusable
///   across multiple images
///
/// # Example
///
/// ```
/// use e6_dither::{DitherMethod, E6Converter, Palette, Rgb};
///
/// let converter = E6Converter::new(Palette::E6)
///     .method(DitherMethod::Ordered)
///     .strict(true);
///
/// let pixels = vec![Rgb::new(128, 128, 128); 4];
/// let result = converter.convert(&pixels, 2, 2).unwrap();
///
/// assert_eq!(result.width(), 2);
/// assert!(result.pixels().iter().all(|&c| Palette::E6.contains(c)));
/// ```
#[derive(Debug, Clone)]
pub struct E6Converter {
    palette: Palette,
    method: DitherMethod,
    optimize: bool,
    optimizer: OptimizerOptions,
    dither_opts: DitherOptions,
    strict: bool,
}

impl E6Converter {
    /// Create a new converter with the given palette.
    ///
    /// Defaults: Floyd-Steinberg, optimizer on with default options, exact
    /// matches preserved, strict check off.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            method: DitherMethod::default(),
            optimize: true,
            optimizer: OptimizerOptions::default(),
            dither_opts: DitherOptions::default(),
            strict: false,
        }
    }

    /// Set the dither method.
    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.method = method;
        self
    }

    /// Enable or disable the color optimizer pass.
    #[inline]
    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    /// Replace the optimizer thresholds and factors.
    #[inline]
    pub fn optimizer_options(mut self, options: OptimizerOptions) -> Self {
        self.optimizer = options;
        self
    }

    /// Keep pixels that already equal a palette color (ordered dithering).
    #[inline]
    pub fn preserve_exact_matches(mut self, enabled: bool) -> Self {
        self.dither_opts = self.dither_opts.preserve_exact_matches(enabled);
        self
    }

    /// Fail conversion if any non-palette pixel survives validation.
    #[inline]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// The palette this converter targets.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The configured dither method.
    #[inline]
    pub fn dither_method(&self) -> DitherMethod {
        self.method
    }

    /// Convert an image to palette-exact colors.
    ///
    /// Pixels are in row-major order; `pixels.len()` must equal
    /// `width * height`. The input is not modified.
    ///
    /// # Errors
    ///
    /// - [`DitherError::DimensionMismatch`] if the buffer length is wrong
    /// - [`DitherError::Incompatible`] if strict mode finds stray pixels
    pub fn convert(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
    ) -> Result<ConvertedImage, DitherError> {
        let expected = DitherError::check_dimensions(pixels.len(), width, height)?;

        let mut working = pixels.to_vec();

        if self.optimize {
            let changed = ColorOptimizer::new(self.optimizer.clone()).apply(&mut working);
            debug!(changed, total = expected, "optimizer pass");
        }

        let mut output = match self.method.ditherer() {
            Some(ditherer) => {
                ditherer.dither(&working, width, height, &self.palette, &self.dither_opts)
            }
            None => working,
        };

        let corrected = enforce(&mut output, &self.palette);
        debug!(corrected, method = %self.method, "palette validation");

        if self.strict {
            let report = check_compatibility(&output, width, height, &self.palette);
            if !report.is_compatible() {
                return Err(DitherError::Incompatible {
                    count: report.incompatible.len(),
                });
            }
        }

        ConvertedImage::from_pixels(output, width, height, self.palette)
    }
}
