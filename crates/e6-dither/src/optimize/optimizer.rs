//! The color optimizer pass.

#[cfg(feature = "threads")]
use rayon::prelude::*;

use crate::color::{Rgb, RgbF};

use super::OptimizerOptions;

const YELLOW: Rgb = Rgb::new(255, 255, 0);
const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

/// Per-pixel saturation heuristic applied before dithering.
///
/// Palette-agnostic: the snap targets are the pure primaries whichever
/// palette the image is later quantized to.
#[derive(Debug, Clone, Default)]
pub struct ColorOptimizer {
    options: OptimizerOptions,
}

impl ColorOptimizer {
    /// Create an optimizer with the given options.
    pub fn new(options: OptimizerOptions) -> Self {
        Self { options }
    }

    /// The options this optimizer runs with.
    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    /// Optimize one pixel: saturation push, then hue snap on the pushed value.
    ///
    /// Arithmetic is done in `f32`; the result is clamped and truncated to
    /// integers once at the end.
    pub fn optimize_pixel(&self, pixel: Rgb) -> Rgb {
        let pushed = self.push_saturation(RgbF::from(pixel));
        if self.options.snap {
            if let Some(primary) = self.snap_target(pushed) {
                return primary;
            }
        }
        pushed.to_rgb_truncated()
    }

    /// Optimize every pixel in place. Returns how many pixels changed.
    pub fn apply(&self, pixels: &mut [Rgb]) -> usize {
        let update = |pixel: &mut Rgb| {
            let optimized = self.optimize_pixel(*pixel);
            let changed = optimized != *pixel;
            *pixel = optimized;
            usize::from(changed)
        };

        #[cfg(feature = "threads")]
        let changed: usize = pixels.par_iter_mut().map(update).sum();

        #[cfg(not(feature = "threads"))]
        let changed: usize = pixels.iter_mut().map(update).sum();

        changed
    }

    /// Primary whose band contains `c`, checked yellow, red, green, blue.
    fn snap_target(&self, c: RgbF) -> Option<Rgb> {
        let high = self.options.snap_high;
        let low = self.options.snap_low;
        let primary = self.options.primary_high;

        if c.r > high && c.g > high && c.b < low {
            Some(YELLOW)
        } else if c.r > primary && c.g < low && c.b < low {
            Some(RED)
        } else if c.g > primary && c.r < low && c.b < low {
            Some(GREEN)
        } else if c.b > primary && c.r < low && c.g < low {
            Some(BLUE)
        } else {
            None
        }
    }

    fn push_saturation(&self, c: RgbF) -> RgbF {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        if max - min <= self.options.spread_threshold {
            return c;
        }

        let enhance = |v: f32| (v * self.options.enhance_factor).min(255.0);
        let reduce = |v: f32| v * self.options.reduce_factor;

        // First channel equal to the max wins ties
        if c.r == max {
            RgbF::new(enhance(c.r), reduce(c.g), reduce(c.b))
        } else if c.g == max {
            RgbF::new(reduce(c.r), enhance(c.g), reduce(c.b))
        } else {
            RgbF::new(reduce(c.r), reduce(c.g), enhance(c.b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn optimizer() -> ColorOptimizer {
        ColorOptimizer::new(OptimizerOptions::default())
    }

    #[test]
    fn test_yellow_snap() {
        assert_eq!(optimizer().optimize_pixel(Rgb::new(220, 210, 30)), YELLOW);
        // 201 * 0.9 = 180.9 clears the band edge only after the push
        assert_eq!(optimizer().optimize_pixel(Rgb::new(201, 201, 99)), YELLOW);
    }

    #[test]
    fn test_primary_snaps() {
        let opt = optimizer();
        assert_eq!(opt.optimize_pixel(Rgb::new(240, 20, 20)), RED);
        assert_eq!(opt.optimize_pixel(Rgb::new(30, 220, 60)), GREEN);
        assert_eq!(opt.optimize_pixel(Rgb::new(10, 40, 230)), BLUE);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        // r == 180 is not inside the yellow band; falls through to the push
        let out = optimizer().optimize_pixel(Rgb::new(180, 200, 30));
        assert_ne!(out, YELLOW);
    }

    #[test]
    fn test_snap_sees_pushed_value() {
        let opt = optimizer();
        // 185 * 1.15 = 212.75 enters the red band, 70 * 0.9 = 63 stays below 100
        assert_eq!(opt.optimize_pixel(Rgb::new(185, 70, 60)), RED);
        // 185 * 0.9 = 166.5 drops out of the yellow band
        assert_eq!(
            opt.optimize_pixel(Rgb::new(190, 185, 90)),
            Rgb::new(218, 166, 81)
        );
    }

    #[test]
    fn test_saturation_push_dominant_red() {
        // 150 * 1.15 = 172.5, 55 * 0.9 = 49.5, 35 * 0.9 = 31.5, truncated
        let out = optimizer().optimize_pixel(Rgb::new(150, 55, 35));
        assert_eq!(out, Rgb::new(172, 49, 31));
    }

    #[test]
    fn test_saturation_push_tie_prefers_red() {
        let out = optimizer().optimize_pixel(Rgb::new(145, 145, 35));
        assert_eq!(out, Rgb::new(166, 130, 31));
    }

    #[test]
    fn test_saturation_push_clamps_dominant() {
        let out = optimizer().optimize_pixel(Rgb::new(230, 120, 40));
        assert_eq!(out.r, 255);
        assert!(out.g < 120 && out.b < 40);
    }

    #[test]
    fn test_low_spread_unchanged() {
        let opt = optimizer();
        for pixel in [
            Rgb::new(90, 90, 90),
            Rgb::new(200, 150, 130),
            Rgb::new(10, 60, 90),
        ] {
            assert_eq!(opt.optimize_pixel(pixel), pixel);
        }
    }

    #[test]
    fn test_snap_disabled() {
        let opt = ColorOptimizer::new(OptimizerOptions::new().snap(false));
        let out = opt.optimize_pixel(Rgb::new(220, 210, 30));
        assert_ne!(out, YELLOW);
        assert!(out.g < 210, "non-dominant green is damped");
    }

    #[test]
    fn test_canonical_palette_fixed_points() {
        let opt = optimizer();
        for &color in Palette::E6.colors() {
            assert_eq!(opt.optimize_pixel(color), color, "{color} should be kept");
        }
    }

    #[test]
    fn test_apply_counts_changes() {
        let mut pixels = vec![
            Rgb::new(220, 210, 30),
            Rgb::new(90, 90, 90),
            Rgb::new(150, 55, 35),
        ];
        let changed = optimizer().apply(&mut pixels);
        assert_eq!(changed, 2);
        assert_eq!(pixels[0], YELLOW);
        assert_eq!(pixels[1], Rgb::new(90, 90, 90));
    }
}
