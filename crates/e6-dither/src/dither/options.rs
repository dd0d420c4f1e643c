//! Dithering options and configuration.
//!
//! This module provides the [`DitherOptions`] struct shared by all
//! [`Dither`](super::Dither) implementations.

/// Configuration options for dithering.
///
/// # Defaults
///
/// - Preserve exact matches: enabled
///
/// # Example
///
/// ```
/// use e6_dither::DitherOptions;
///
/// let options = DitherOptions::new();
/// assert!(options.preserve_exact_matches);
///
/// let options = DitherOptions::new().preserve_exact_matches(false);
/// assert!(!options.preserve_exact_matches);
/// ```
#[derive(Debug, Clone)]
pub struct DitherOptions {
    /// Emit pixels that already equal a palette color unchanged.
    ///
    /// Only the ordered ditherer consults this flag. Without it, the
    /// threshold offset can push a solid palette-color fill onto a
    /// neighboring entry (pure yellow plus the lowest threshold lands
    /// nearer to black). Error diffusion always follows the accumulated
    /// value instead.
    ///
    /// Default: `true`
    pub preserve_exact_matches: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            preserve_exact_matches: true,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    ///
    /// This is equivalent to `DitherOptions::default()` but more discoverable.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set exact match preservation mode.
    ///
    /// # Arguments
    /// * `enabled` - Whether to keep pixels that exactly match palette colors
    #[inline]
    pub fn preserve_exact_matches(mut self, enabled: bool) -> Self {
        self.preserve_exact_matches = enabled;
        self
    }
}
