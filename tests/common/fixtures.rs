//! Test fixtures: synthetic images written as PNG files.

use std::path::{Path, PathBuf};

use e6_dither::Rgb;

/// Horizontal gray ramp, `x -> (x, x, x)` scaled to the width.
pub fn gray_ramp(width: usize, height: usize) -> Vec<Rgb> {
    (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| {
                let v = (x * 255 / (width - 1).max(1)) as u8;
                Rgb::new(v, v, v)
            })
        })
        .collect()
}

/// Smooth RGB gradient touching every palette hue region.
pub fn color_gradient(width: usize, height: usize) -> Vec<Rgb> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                let b = ((x + y) * 127 / (width + height).max(1)) as u8;
                Rgb::new(r, g, b)
            })
        })
        .collect()
}

/// Encode pixels as an 8-bit RGB PNG.
pub fn encode_rgb_png(pixels: &[Rgb], width: usize, height: usize) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width as u32, height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    buf
}

/// Write pixels as an RGB PNG at `dir/name`, returning the path.
pub fn write_rgb_png(dir: &Path, name: &str, pixels: &[Rgb], width: usize, height: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_rgb_png(pixels, width, height)).unwrap();
    path
}

/// Read PNG header info (color type, bit depth, palette length in entries).
pub fn png_header(path: &Path) -> (png::ColorType, png::BitDepth, Option<usize>) {
    let file = std::fs::File::open(path).unwrap();
    let decoder = png::Decoder::new(file);
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (
        info.color_type,
        info.bit_depth,
        info.palette.as_ref().map(|p| p.len() / 3),
    )
}

/// Read raw 4-bit indices from an indexed PNG, one value per pixel.
pub fn read_raw_indices(path: &Path) -> Vec<u8> {
    let file = std::fs::File::open(path).unwrap();
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(info.bit_depth, png::BitDepth::Four);

    let width = info.width as usize;
    let mut indices = Vec::with_capacity(width * info.height as usize);
    for row in buf[..info.buffer_size()].chunks(info.line_size) {
        for x in 0..width {
            let byte = row[x / 2];
            indices.push(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F });
        }
    }
    indices
}

/// Raw BMP contents read straight from the file bytes: bits per pixel,
/// width, height and the pixel triples in top-down raster order.
pub fn read_bmp_triples(path: &Path) -> (u16, usize, usize, Vec<Rgb>) {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
    let le32 = |at: usize| u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());

    let data_offset = le32(10) as usize;
    let width = le32(18) as i32;
    let height = le32(22) as i32;
    let bit_count = u16::from_le_bytes([bytes[28], bytes[29]]);
    assert_eq!(bit_count, 24, "only 24-bit BMP is read here");

    let (width, rows) = (width as usize, height.unsigned_abs() as usize);
    let stride = (width * 3).div_ceil(4) * 4;
    let mut pixels = Vec::with_capacity(width * rows);
    for row in 0..rows {
        // Positive height stores rows bottom-up
        let stored = if height > 0 { rows - 1 - row } else { row };
        let start = data_offset + stored * stride;
        for bgr in bytes[start..start + width * 3].chunks_exact(3) {
            pixels.push(Rgb::new(bgr[2], bgr[1], bgr[0]));
        }
    }
    (bit_count, width, rows, pixels)
}
