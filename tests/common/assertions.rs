//! Assertion helpers for tests.

use e6_dither::{check_compatibility, Palette};
use e6conv::image_io::DecodedImage;
use pretty_assertions::assert_eq;

/// Assert every pixel of a decoded image is a palette color
pub fn assert_palette_exact(image: &DecodedImage, palette: &Palette) {
    let report = check_compatibility(&image.pixels, image.width, image.height, palette);
    assert!(
        report.is_compatible(),
        "Expected palette-exact image, found {} stray pixels (first: {:?})",
        report.incompatible.len(),
        report.incompatible.first()
    );
    assert_eq!(report.total, image.width * image.height);
}
