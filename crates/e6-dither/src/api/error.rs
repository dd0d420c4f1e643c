//! Unified error type for the e6-dither public API.
//!
//! [`DitherError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::dither::ParseMethodError;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the e6-dither public API.
///
/// # Example
///
/// ```
/// use e6_dither::{DitherError, DitherMethod, Palette};
///
/// fn setup(method: &str) -> Result<(Palette, DitherMethod), DitherError> {
///     let palette = Palette::from_hex(&[
///         "#000000", "#FFFFFF", "#FFFF00", "#FF0000", "#0000FF", "#00FF00",
///     ])?;
///     Ok((palette, method.parse()?))
/// }
///
/// assert!(setup("bayer").is_ok());
/// assert!(matches!(setup("halftone"), Err(DitherError::ParseMethod(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DitherError {
    /// Pixel buffer length does not match `width * height`.
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Pixels outside the palette remained after conversion.
    #[error("{count} pixels are not palette colors")]
    Incompatible { count: usize },

    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    /// Unknown dither method name
    #[error(transparent)]
    ParseMethod(#[from] ParseMethodError),
}

impl DitherError {
    /// Check that a buffer of `len` pixels covers `width x height`.
    ///
    /// Returns the pixel count. When `width * height` overflows, the error
    /// reports `expected` as `usize::MAX`.
    pub(crate) fn check_dimensions(
        len: usize,
        width: usize,
        height: usize,
    ) -> Result<usize, Self> {
        match width.checked_mul(height) {
            Some(expected) if expected == len => Ok(expected),
            expected => Err(Self::DimensionMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: len,
            }),
        }
    }
}
