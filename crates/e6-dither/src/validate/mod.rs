//! Strict palette validation.
//!
//! The panel decodes pixels by exact tuple comparison, so an image is only
//! usable when every pixel is bit-exact one of the six palette colors. This
//! module provides the two sides of that guarantee:
//!
//! - [`enforce`] rewrites stray pixels to their nearest palette color. It is
//!   the last stage of every conversion, whichever dither method ran.
//! - [`check_compatibility`] reports stray pixels without touching the
//!   image, along with the distribution of palette colors.
//!
//! # Example
//!
//! ```
//! use e6_dither::validate::{check_compatibility, enforce};
//! use e6_dither::{Palette, Rgb};
//!
//! let mut pixels = vec![Rgb::new(0, 0, 0), Rgb::new(250, 10, 5)];
//!
//! let report = check_compatibility(&pixels, 2, 1, &Palette::E6);
//! assert_eq!(report.incompatible.len(), 1);
//!
//! assert_eq!(enforce(&mut pixels, &Palette::E6), 1);
//! assert!(check_compatibility(&pixels, 2, 1, &Palette::E6).is_compatible());
//! ```

mod compatibility;
mod enforce;

pub use compatibility::{check_compatibility, CompatibilityReport, IncompatiblePixel};
pub use enforce::enforce;
