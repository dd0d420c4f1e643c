//! Color types
//!
//! - [`Rgb`]: 8-bit channels, used for images, palettes and exact matching.
//! - [`RgbF`]: `f32` channels on the same 0..=255 scale, used for all
//!   intermediate math.
//!
//! # Example
//!
//! ```
//! use e6_dither::{Rgb, RgbF};
//!
//! let pixel = Rgb::new(200, 100, 50);
//! let working = RgbF::from(pixel) * 1.5;
//! assert_eq!(working.to_rgb_truncated(), Rgb::new(255, 150, 75));
//! ```

mod rgb;

pub use rgb::{Rgb, RgbF};
