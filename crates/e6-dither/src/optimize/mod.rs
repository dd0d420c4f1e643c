//! Pre-quantization color optimization.
//!
//! The [`ColorOptimizer`] nudges pixels toward the panel's primaries before
//! dithering. It is a heuristic: output is visually punchier on a six-color
//! panel but carries no correctness guarantee. Palette exactness is the
//! validator's job, not the optimizer's.
//!
//! Two rules run per pixel, in order:
//!
//! 1. **Saturation push** - when the spread between the strongest and
//!    weakest channel exceeds a threshold, the dominant channel is boosted
//!    and the other two are damped.
//! 2. **Hue snap** - if the pushed value falls inside a band characteristic
//!    of yellow, red, green or blue, it becomes that exact primary.
//!
//! The result is clamped and truncated once, at the end.
//!
//! Thresholds and factors live in [`OptimizerOptions`].
//!
//! # Example
//!
//! ```
//! use e6_dither::{ColorOptimizer, OptimizerOptions, Rgb};
//!
//! let optimizer = ColorOptimizer::new(OptimizerOptions::default());
//!
//! // A dull yellow snaps to the pure primary
//! assert_eq!(optimizer.optimize_pixel(Rgb::new(220, 210, 30)), Rgb::new(255, 255, 0));
//!
//! // Neutral gray has no dominant channel and passes through
//! assert_eq!(optimizer.optimize_pixel(Rgb::new(90, 90, 90)), Rgb::new(90, 90, 90));
//! ```

mod optimizer;
mod options;

pub use optimizer::ColorOptimizer;
pub use options::{
    OptimizerOptions, DOMINANT_SPREAD, ENHANCE_FACTOR, PRIMARY_HIGH, REDUCE_FACTOR, SNAP_HIGH,
    SNAP_LOW,
};
