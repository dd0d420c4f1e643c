//! Output type for the conversion pipeline.
//!
//! [`ConvertedImage`] holds a palette-exact image together with its
//! dimensions and palette, and offers the views an encoder needs:
//!
//! - **RGB** ([`ConvertedImage::pixels`], [`ConvertedImage::to_rgb_bytes`])
//! - **Palette indices** ([`ConvertedImage::indices`]): `0..6`, canonical order
//! - **Device indices** ([`ConvertedImage::device_indices`]): positions in
//!   the 7-slot firmware table, never the skip slot

mod converted_image;

pub use converted_image::ConvertedImage;
