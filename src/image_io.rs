//! Image decode for source files and encode for converted ones.
//!
//! Sources are PNG or BMP. Converted images are written either as a 4-bit
//! indexed PNG or as an uncompressed 24-bit BMP, the only format the panel
//! firmware reads.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use e6_dither::{ConvertedImage, Rgb};
use image::codecs::bmp::BmpEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::Deserialize;

use crate::error::{ImageIoError, ParseFormatError};

/// Container format for converted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// 4-bit indexed PNG
    #[default]
    Png,
    /// 24-bit BMP, one raw RGB triple per pixel
    Bmp,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// An 8-bit RGB image decoded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<Rgb>,
    pub width: usize,
    pub height: usize,
}

/// Decode a PNG into 8-bit RGB.
///
/// Palette, grayscale and 16-bit images are expanded to 8-bit channels;
/// transparency is composited against white.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let width = info.width as usize;
    let height = info.height as usize;

    let pixels: Vec<Rgb> = match info.color_type {
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|p| composite_on_white(p[0], p[1], p[2], p[3]))
            .collect(),
        png::ColorType::Grayscale => buf.iter().map(|&v| Rgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|p| composite_on_white(p[0], p[0], p[0], p[1]))
            .collect(),
        other => return Err(ImageIoError::UnsupportedColorType(other)),
    };

    Ok(DecodedImage {
        pixels,
        width,
        height,
    })
}

/// Decode a BMP into 8-bit RGB, compositing any alpha against white.
pub fn decode_bmp(bytes: &[u8]) -> Result<DecodedImage, ImageIoError> {
    let rgba = image::load_from_memory_with_format(bytes, ImageFormat::Bmp)?.into_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    let pixels = rgba
        .pixels()
        .map(|&image::Rgba([r, g, b, a])| composite_on_white(r, g, b, a))
        .collect();

    Ok(DecodedImage {
        pixels,
        width,
        height,
    })
}

/// Decode a PNG or BMP, picked by its signature.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, ImageIoError> {
    if bytes.starts_with(b"BM") {
        decode_bmp(bytes)
    } else {
        decode_png(bytes)
    }
}

/// Read and decode a PNG or BMP file.
pub fn read_image(path: &Path) -> Result<DecodedImage, ImageIoError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Image dimensions as encoder arguments; empty images are rejected.
fn encoder_dimensions(image: &ConvertedImage) -> Result<(u32, u32), ImageIoError> {
    match (u32::try_from(image.width()), u32::try_from(image.height())) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ImageIoError::UnsupportedDimensions {
            width: image.width(),
            height: image.height(),
        }),
    }
}

/// Encode a converted image as a 4-bit indexed PNG.
///
/// With `device_table` set, pixel values index the 7-slot firmware table
/// (slot 4 unused) and that table is written as PLTE. Otherwise the PLTE
/// holds the six palette colors in canonical order.
pub fn encode_png(image: &ConvertedImage, device_table: bool) -> Result<Vec<u8>, ImageIoError> {
    let (width, height) = encoder_dimensions(image)?;

    let (indices, plte): (Vec<u8>, Vec<u8>) = if device_table {
        (
            image.device_indices(),
            image
                .palette()
                .device_table()
                .iter()
                .flat_map(|c| c.to_bytes())
                .collect(),
        )
    } else {
        (
            image.indices().to_vec(),
            image
                .palette()
                .colors()
                .iter()
                .flat_map(|c| c.to_bytes())
                .collect(),
        )
    };

    let packed = pack_nibbles(&indices, image.width());

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Four);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&packed)?;
    }
    Ok(buf.into_inner())
}

/// Encode a converted image as an uncompressed 24-bit BMP.
///
/// Every pixel is written as its exact palette RGB triple, so a reader that
/// matches raw bytes against the palette sees only palette colors.
pub fn encode_bmp(image: &ConvertedImage) -> Result<Vec<u8>, ImageIoError> {
    let (width, height) = encoder_dimensions(image)?;
    let mut buf = Vec::new();
    BmpEncoder::new(&mut buf).write_image(
        &image.to_rgb_bytes(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Encode a converted image in `format`.
///
/// `device_table` only affects PNG output; BMP carries raw RGB.
pub fn encode_image(
    image: &ConvertedImage,
    format: OutputFormat,
    device_table: bool,
) -> Result<Vec<u8>, ImageIoError> {
    match format {
        OutputFormat::Png => encode_png(image, device_table),
        OutputFormat::Bmp => encode_bmp(image),
    }
}

/// Encode and write a converted image.
pub fn write_image(
    path: &Path,
    image: &ConvertedImage,
    format: OutputFormat,
    device_table: bool,
) -> Result<(), ImageIoError> {
    let bytes = encode_image(image, format, device_table)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Alpha composite against white.
fn composite_on_white(r: u8, g: u8, b: u8, a: u8) -> Rgb {
    match a {
        255 => Rgb::new(r, g, b),
        0 => Rgb::new(255, 255, 255),
        _ => {
            let af = a as u16;
            let blend = |c: u8| ((c as u16 * af + 255 * (255 - af)) / 255) as u8;
            Rgb::new(blend(r), blend(g), blend(b))
        }
    }
}

/// Pack 4-bit indices two per byte, high nibble first. Each row starts on
/// a fresh byte; an odd width leaves the last low nibble zero.
fn pack_nibbles(indices: &[u8], width: usize) -> Vec<u8> {
    indices
        .chunks(width)
        .flat_map(|row| {
            row.chunks(2)
                .map(|pair| ((pair[0] & 0x0F) << 4) | pair.get(1).map_or(0, |&lo| lo & 0x0F))
        })
        .collect()
}
