//! Optimizer thresholds and factors.

/// Minimum `max - min` channel spread for the saturation push.
pub const DOMINANT_SPREAD: f32 = 80.0;

/// Multiplier for the dominant channel.
pub const ENHANCE_FACTOR: f32 = 1.15;

/// Multiplier for the two non-dominant channels.
pub const REDUCE_FACTOR: f32 = 0.9;

/// Lower bound for the two strong channels of the yellow band.
pub const SNAP_HIGH: f32 = 180.0;

/// Upper bound for weak channels in every snap band.
pub const SNAP_LOW: f32 = 100.0;

/// Lower bound for the strong channel of the red, green and blue bands.
pub const PRIMARY_HIGH: f32 = 200.0;

/// Configuration for [`ColorOptimizer`](super::ColorOptimizer).
///
/// All fields default to the named constants in this module. With the
/// `serde` feature, missing fields in a config file fall back to those
/// defaults.
///
/// # Example
///
/// ```
/// use e6_dither::OptimizerOptions;
///
/// let options = OptimizerOptions::new().snap(false).spread_threshold(60.0);
/// assert!(!options.snap);
/// assert_eq!(options.spread_threshold, 60.0);
/// assert_eq!(options.enhance_factor, 1.15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerOptions {
    /// Enable hue snapping to the primaries.
    ///
    /// Default: `true`
    pub snap: bool,

    /// Channel spread above which the saturation push applies.
    ///
    /// Default: [`DOMINANT_SPREAD`]
    pub spread_threshold: f32,

    /// Dominant channel multiplier (result clamped to 255).
    ///
    /// Default: [`ENHANCE_FACTOR`]
    pub enhance_factor: f32,

    /// Non-dominant channel multiplier.
    ///
    /// Default: [`REDUCE_FACTOR`]
    pub reduce_factor: f32,

    /// Default: [`SNAP_HIGH`]
    pub snap_high: f32,

    /// Default: [`SNAP_LOW`]
    pub snap_low: f32,

    /// Default: [`PRIMARY_HIGH`]
    pub primary_high: f32,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            snap: true,
            spread_threshold: DOMINANT_SPREAD,
            enhance_factor: ENHANCE_FACTOR,
            reduce_factor: REDUCE_FACTOR,
            snap_high: SNAP_HIGH,
            snap_low: SNAP_LOW,
            primary_high: PRIMARY_HIGH,
        }
    }
}

impl OptimizerOptions {
    /// Create new optimizer options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable hue snapping.
    #[inline]
    pub fn snap(mut self, enabled: bool) -> Self {
        self.snap = enabled;
        self
    }

    /// Set the channel spread that triggers the saturation push.
    #[inline]
    pub fn spread_threshold(mut self, spread: f32) -> Self {
        self.spread_threshold = spread;
        self
    }

    /// Set the dominant and non-dominant channel multipliers.
    #[inline]
    pub fn factors(mut self, enhance: f32, reduce: f32) -> Self {
        self.enhance_factor = enhance;
        self.reduce_factor = reduce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let opts = OptimizerOptions::default();
        assert!(opts.snap);
        assert_eq!(opts.spread_threshold, 80.0);
        assert_eq!(opts.enhance_factor, 1.15);
        assert_eq!(opts.reduce_factor, 0.9);
        assert_eq!(opts.snap_high, 180.0);
        assert_eq!(opts.snap_low, 100.0);
        assert_eq!(opts.primary_high, 200.0);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = OptimizerOptions::new()
            .snap(false)
            .spread_threshold(50.0)
            .factors(1.3, 0.8);
        assert!(!opts.snap);
        assert_eq!(opts.spread_threshold, 50.0);
        assert_eq!(opts.enhance_factor, 1.3);
        assert_eq!(opts.reduce_factor, 0.8);
    }
}
