use std::fmt;

use crate::color::Rgb;
use crate::palette::{Palette, PALETTE_LEN};

/// A pixel that is not exactly one of the palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompatiblePixel {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// The offending color
    pub color: Rgb,
}

/// Result of [`check_compatibility`].
///
/// Diagnostic only; an incompatible image is reported, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityReport {
    /// Every non-palette pixel, in raster order.
    pub incompatible: Vec<IncompatiblePixel>,
    /// Pixel count per palette index.
    pub color_counts: [usize; PALETTE_LEN],
    /// Total number of pixels checked.
    pub total: usize,
}

impl CompatibilityReport {
    /// Whether every pixel is a palette color.
    pub fn is_compatible(&self) -> bool {
        self.incompatible.is_empty()
    }

    /// Share of pixels holding palette color `idx`, in `0.0..=1.0`.
    pub fn fraction(&self, idx: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.color_counts[idx] as f64 / self.total as f64
        }
    }
}

impl fmt::Display for CompatibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compatible() {
            writeln!(f, "compatible: all {} pixels use palette colors", self.total)?;
        } else {
            writeln!(
                f,
                "incompatible: {} of {} pixels are not palette colors",
                self.incompatible.len(),
                self.total
            )?;
        }
        for (idx, name) in Palette::NAMES.iter().enumerate() {
            writeln!(
                f,
                "  {:<6} {:>9} ({:5.1}%)",
                name,
                self.color_counts[idx],
                self.fraction(idx) * 100.0
            )?;
        }
        Ok(())
    }
}

/// Scan an image for pixels outside the palette and count palette colors.
///
/// `pixels` is row-major with `width` columns; `height` is used to bound the
/// scan. Never fails.
pub fn check_compatibility(
    pixels: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
) -> CompatibilityReport {
    let mut incompatible = Vec::new();
    let mut color_counts = [0usize; PALETTE_LEN];
    let mut total = 0;

    if width > 0 {
        for (y, row) in pixels.chunks(width).take(height).enumerate() {
            for (x, &color) in row.iter().enumerate() {
                total += 1;
                match palette.index_of(color) {
                    Some(idx) => color_counts[idx] += 1,
                    None => incompatible.push(IncompatiblePixel { x, y, color }),
                }
            }
        }
    }

    CompatibilityReport {
        incompatible,
        color_counts,
        total,
    }
}
