//! 8-bit RGB color and its floating-point working form.
//!
//! [`Rgb`] is what images and palettes store. [`RgbF`] is what the per-pixel
//! math runs on, so that error accumulation and saturation scaling never round
//! until a result is written back.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit RGB color.
///
/// Equality is exact tuple equality, which is what the panel firmware uses
/// to decode a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values.
    ///
    /// # Example
    /// ```
    /// use e6_dither::Rgb;
    /// let yellow = Rgb::new(255, 255, 0);
    /// assert_eq!(yellow.to_bytes(), [255, 255, 0]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as an uppercase `#RRGGBB` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use e6_dither::Rgb;
    ///
    /// let yellow: Rgb = "#FFFF00".parse().unwrap();
    /// assert_eq!(yellow, Rgb::new(255, 255, 0));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        // from_str_radix alone would accept a sign
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidCharacter(c));
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// A color with `f32` channels on the 0..=255 scale.
///
/// Values may leave the 0..=255 range while error or scaling is being
/// applied; [`RgbF::clamped`] brings them back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbF {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl RgbF {
    /// Create a working color from channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel to `0.0..=255.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 255.0),
            g: self.g.clamp(0.0, 255.0),
            b: self.b.clamp(0.0, 255.0),
        }
    }

    /// Squared Euclidean distance to another color.
    #[inline]
    pub fn distance_sq(self, other: RgbF) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Clamp to `0..=255` and truncate each channel to an integer.
    #[inline]
    pub fn to_rgb_truncated(self) -> Rgb {
        let c = self.clamped();
        Rgb::new(c.r as u8, c.g as u8, c.b as u8)
    }
}

impl From<Rgb> for RgbF {
    #[inline]
    fn from(c: Rgb) -> Self {
        Self::new(c.r as f32, c.g as f32, c.b as f32)
    }
}

impl std::ops::Sub for RgbF {
    type Output = RgbF;

    #[inline]
    fn sub(self, rhs: RgbF) -> RgbF {
        RgbF::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl std::ops::Add for RgbF {
    type Output = RgbF;

    #[inline]
    fn add(self, rhs: RgbF) -> RgbF {
        RgbF::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl std::ops::Mul<f32> for RgbF {
    type Output = RgbF;

    #[inline]
    fn mul(self, k: f32) -> RgbF {
        RgbF::new(self.r * k, self.g * k, self.b * k)
    }
}
