#![allow(clippy::module_inception)]

//! e6-dither: color reduction for six-color e-ink panels
//!
//! This library reduces arbitrary RGB images to the six colors an E6-class
//! color e-ink panel can show (black, white, yellow, red, blue, green) and
//! guarantees that every output pixel is bit-exact one of them. Panel
//! controllers decode pixels by exact tuple comparison, so a near miss is
//! not good enough.
//!
//! # Quick Start
//!
//! The [`E6Converter`] builder is the primary entry point:
//!
//! ```
//! use e6_dither::{E6Converter, Palette, Rgb};
//!
//! let converter = E6Converter::new(Palette::E6);
//! let pixels = vec![Rgb::new(128, 128, 128); 4];
//! let result = converter.convert(&pixels, 2, 2).unwrap();
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.height(), 2);
//! assert!(result.pixels().iter().all(|&c| Palette::E6.contains(c)));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RGB image -> [ColorOptimizer] -> {FloydSteinberg | Bayer | none} -> validate::enforce -> ConvertedImage
//! ```
//!
//! - [`ColorOptimizer`]: optional saturation push and hue snap toward the
//!   primaries.
//! - [`FloydSteinberg`]: sequential error diffusion, the default.
//! - [`Bayer`]: 4x4 ordered dithering, pixel-independent.
//! - [`validate::enforce`]: maps any stray pixel to its nearest palette
//!   color. Always runs.
//!
//! # Color Matching
//!
//! Nearest-color search is plain squared Euclidean distance in 8-bit RGB,
//! ties going to the lower palette index. With six widely spaced entries
//! this is enough, and it keeps every decision reproducible.
//!
//! # Features
//!
//! - `threads` (default): parallel row processing with rayon for the
//!   optimizer, ordered dithering and validation. Output is identical with
//!   and without it.
//! - `serde`: `Deserialize`/`Serialize` for [`DitherMethod`],
//!   [`PaletteVariant`] and [`OptimizerOptions`].

pub mod api;
pub mod color;
pub mod dither;
pub mod optimize;
pub mod output;
pub mod palette;
pub mod validate;


pub use api::{DitherError, E6Converter};
pub use color::{Rgb, RgbF};
pub use dither::{Bayer, Dither, DitherMethod, DitherOptions, FloydSteinberg, ParseMethodError};
pub use optimize::{ColorOptimizer, OptimizerOptions};
pub use output::ConvertedImage;
pub use palette::{
    Palette, PaletteError, PaletteVariant, ParseColorError, DEVICE_SKIP_SLOT, DEVICE_TABLE_LEN,
    PALETTE_LEN,
};
pub use validate::{check_compatibility, CompatibilityReport, IncompatiblePixel};
