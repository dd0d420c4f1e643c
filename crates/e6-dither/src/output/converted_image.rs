//! ConvertedImage: the palette-exact result of a conversion.

use crate::api::DitherError;
use crate::color::Rgb;
use crate::palette::{Palette, PALETTE_LEN};

/// A palette-exact image.
///
/// Every pixel is bit-exact one of the palette's six colors; construction
/// through [`ConvertedImage::from_pixels`] rejects anything else, and
/// [`E6Converter::convert`](crate::E6Converter::convert) only produces
/// validated images.
///
/// # Example
///
/// ```
/// use e6_dither::{ConvertedImage, Palette, Rgb};
///
/// let black = Rgb::new(0, 0, 0);
/// let blue = Rgb::new(0, 0, 255);
/// let image = ConvertedImage::from_pixels(vec![black, blue], 2, 1, Palette::E6).unwrap();
///
/// assert_eq!(image.indices(), &[0, 4]);
/// assert_eq!(image.device_indices(), vec![0, 5]);
/// assert_eq!(image.to_rgb_bytes(), vec![0, 0, 0, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedImage {
    pixels: Vec<Rgb>,
    /// Palette index per pixel, kept in step with `pixels`.
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl ConvertedImage {
    /// Wrap a palette-exact pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`DitherError::DimensionMismatch`] if `pixels.len() != width * height`
    /// - [`DitherError::Incompatible`] if any pixel is not a palette color
    pub fn from_pixels(
        pixels: Vec<Rgb>,
        width: usize,
        height: usize,
        palette: Palette,
    ) -> Result<Self, DitherError> {
        DitherError::check_dimensions(pixels.len(), width, height)?;

        let mut indices = Vec::with_capacity(pixels.len());
        let mut stray = 0;
        for &pixel in &pixels {
            match palette.index_of(pixel) {
                Some(idx) => indices.push(idx as u8),
                None => stray += 1,
            }
        }
        if stray > 0 {
            return Err(DitherError::Incompatible { count: stray });
        }

        Ok(Self {
            pixels,
            indices,
            width,
            height,
            palette,
        })
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Consume the image, returning its pixel buffer.
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Palette index (`0..6`) per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// 7-slot firmware table index per pixel, row-major.
    ///
    /// See [`Palette::device_index`].
    pub fn device_indices(&self) -> Vec<u8> {
        self.indices
            .iter()
            .map(|&idx| Palette::device_index(idx as usize))
            .collect()
    }

    /// Flat `[R, G, B, R, G, B, ...]` buffer of length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Number of pixels per palette index.
    pub fn color_counts(&self) -> [usize; PALETTE_LEN] {
        let mut counts = [0; PALETTE_LEN];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the palette this image was converted to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
