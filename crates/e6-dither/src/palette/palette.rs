//! Fixed six-color palette with nearest-color matching.
//!
//! The panel renders exactly six colors and decodes every pixel by exact
//! tuple comparison. [`Palette`] is therefore a closed `[Rgb; 6]`: there is
//! no way to build one with a missing, extra or repeated entry.
//!
//! Some firmware image formats carry a 7-slot color table with an unused
//! slot at index 4. That table is generated on demand by
//! [`Palette::device_table`] and never stored as palette state.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::{Rgb, RgbF};

/// Number of colors in every palette.
pub const PALETTE_LEN: usize = 6;

/// Number of slots in the firmware color table.
pub const DEVICE_TABLE_LEN: usize = 7;

/// Firmware table slot that carries no color of its own.
pub const DEVICE_SKIP_SLOT: usize = 4;

/// The six colors a panel can show, in canonical order:
/// black, white, yellow, red, blue, green.
///
/// Matching uses plain squared Euclidean distance in RGB. Ties resolve to
/// the entry with the lower index, so results are reproducible across runs
/// and platforms.
///
/// # Example
///
/// ```
/// use e6_dither::{Palette, Rgb, RgbF};
///
/// let palette = Palette::E6;
///
/// // Orange sits closer to red than to yellow
/// let nearest = palette.nearest(RgbF::new(250.0, 90.0, 10.0));
/// assert_eq!(nearest, Rgb::new(255, 0, 0));
///
/// // Palette members map to themselves
/// assert_eq!(palette.nearest(Rgb::new(0, 0, 255).into()), Rgb::new(0, 0, 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Rgb; PALETTE_LEN],
}

impl Palette {
    /// Canonical palette: pure RGB primaries plus black and white.
    pub const E6: Palette = Palette {
        colors: [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
        ],
    };

    /// Measured panel tones, for firmware that expects them instead of the
    /// pure primaries. Same order as [`Palette::E6`].
    pub const E6_PERCEPTUAL: Palette = Palette {
        colors: [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 243, 56),
            Rgb::new(191, 0, 0),
            Rgb::new(100, 64, 255),
            Rgb::new(67, 138, 28),
        ],
    };

    /// Human-readable names for the six palette positions.
    pub const NAMES: [&'static str; PALETTE_LEN] =
        ["black", "white", "yellow", "red", "blue", "green"];

    /// Create a palette from six colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::DuplicateColor`] if any color appears twice.
    ///
    /// # Example
    ///
    /// ```
    /// use e6_dither::{Palette, PaletteError, Rgb};
    ///
    /// let black = Rgb::new(0, 0, 0);
    /// let result = Palette::new([
    ///     black,
    ///     Rgb::new(255, 255, 255),
    ///     Rgb::new(255, 255, 0),
    ///     Rgb::new(255, 0, 0),
    ///     black, // a "skip" slot repeating black is rejected
    ///     Rgb::new(0, 0, 255),
    /// ]);
    /// assert!(matches!(result, Err(PaletteError::DuplicateColor { index: 4, .. })));
    /// ```
    pub fn new(colors: [Rgb; PALETTE_LEN]) -> Result<Self, PaletteError> {
        let mut seen = HashSet::new();
        for (index, &color) in colors.iter().enumerate() {
            if !seen.insert(color) {
                return Err(PaletteError::DuplicateColor { index, color });
            }
        }
        Ok(Self { colors })
    }

    /// Create a palette from six hex color strings.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] for an invalid hex string and
    /// [`PaletteError::DuplicateColor`] for repeated colors.
    ///
    /// ```
    /// use e6_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&[
    ///     "#000000", "#FFFFFF", "#FFF338", "#BF0000", "#6440FF", "#438A1C",
    /// ]).unwrap();
    /// assert_eq!(palette, Palette::E6_PERCEPTUAL);
    /// ```
    pub fn from_hex(hex: &[&str; PALETTE_LEN]) -> Result<Self, PaletteError> {
        let mut colors = [Rgb::default(); PALETTE_LEN];
        for (slot, s) in colors.iter_mut().zip(hex.iter()) {
            *slot = Rgb::from_str(s)?;
        }
        Self::new(colors)
    }

    /// All colors in canonical order.
    #[inline]
    pub fn colors(&self) -> &[Rgb; PALETTE_LEN] {
        &self.colors
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        PALETTE_LEN
    }

    /// Always `false`; a palette holds exactly six colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= PALETTE_LEN`.
    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Index of the closest palette entry to `color`.
    ///
    /// Squared Euclidean RGB distance, strict `<` while scanning in
    /// canonical order, so equidistant entries resolve to the lower index.
    #[inline]
    pub fn nearest_index(&self, color: RgbF) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(RgbF::from(entry));
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// Closest palette entry to `color`, returned as the exact entry.
    #[inline]
    pub fn nearest(&self, color: RgbF) -> Rgb {
        self.colors[self.nearest_index(color)]
    }

    /// Whether `color` is bit-exact one of the palette entries.
    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Position of `color` in the palette, if it is an exact member.
    #[inline]
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// The 7-slot firmware color table.
    ///
    /// Slots 0-3 hold black, white, yellow, red; slot 4 is unused and repeats
    /// black; slots 5-6 hold blue and green.
    ///
    /// ```
    /// use e6_dither::{Palette, Rgb, DEVICE_SKIP_SLOT};
    ///
    /// let table = Palette::E6.device_table();
    /// assert_eq!(table[DEVICE_SKIP_SLOT], Rgb::new(0, 0, 0));
    /// assert_eq!(table[5], Rgb::new(0, 0, 255));
    /// ```
    pub fn device_table(&self) -> [Rgb; DEVICE_TABLE_LEN] {
        let mut table = [self.colors[0]; DEVICE_TABLE_LEN];
        for (idx, &color) in self.colors.iter().enumerate() {
            table[Self::device_index(idx) as usize] = color;
        }
        table
    }

    /// Firmware table slot for palette index `idx`. Never returns the skip slot.
    #[inline]
    pub fn device_index(idx: usize) -> u8 {
        debug_assert!(idx < PALETTE_LEN, "palette index {idx} out of range");
        if idx < DEVICE_SKIP_SLOT {
            idx as u8
        } else {
            (idx + 1) as u8
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::E6
    }
}

/// Named palette selection.
///
/// There is exactly one canonical palette value; alternatives are selected
/// by name here rather than by redefining the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PaletteVariant {
    /// [`Palette::E6`]
    #[default]
    E6,
    /// [`Palette::E6_PERCEPTUAL`]
    #[cfg_attr(feature = "serde", serde(alias = "perceptual"))]
    E6Perceptual,
}

impl PaletteVariant {
    /// The palette this variant names.
    pub fn palette(self) -> Palette {
        match self {
            PaletteVariant::E6 => Palette::E6,
            PaletteVariant::E6Perceptual => Palette::E6_PERCEPTUAL,
        }
    }

    /// Config and command-line name.
    pub fn name(self) -> &'static str {
        match self {
            PaletteVariant::E6 => "e6",
            PaletteVariant::E6Perceptual => "e6-perceptual",
        }
    }
}

impl fmt::Display for PaletteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteVariant {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e6" => Ok(PaletteVariant::E6),
            "e6-perceptual" | "perceptual" => Ok(PaletteVariant::E6Perceptual),
            other => Err(PaletteError::UnknownVariant(other.to_string())),
        }
    }
}
