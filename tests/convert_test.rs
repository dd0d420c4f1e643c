//! End-to-end conversion tests: PNG in, palette-exact indexed PNG or
//! 24-bit BMP out.

mod common;

use common::*;
use e6_dither::{DitherMethod, Palette, PaletteVariant, Rgb, DEVICE_SKIP_SLOT};
use e6conv::batch::{check_file, convert_batch, convert_file, OutputOptions};
use e6conv::config::AppConfig;
use e6conv::error::ConvertError;
use e6conv::image_io::{read_image, OutputFormat};
use pretty_assertions::assert_eq;

#[test]
fn test_convert_writes_indexed_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_rgb_png(dir.path(), "gradient.png", &color_gradient(48, 32), 48, 32);

    let converter = AppConfig::default().converter();
    let result = convert_file(&input, &converter, &OutputOptions::default()).unwrap();

    assert_eq!(result.output, dir.path().join("gradient_e6.png"));
    assert_eq!((result.width, result.height), (48, 32));
    assert_eq!(result.color_counts.iter().sum::<usize>(), 48 * 32);

    let (color_type, bit_depth, plte_len) = png_header(&result.output);
    assert_eq!(color_type, png::ColorType::Indexed);
    assert_eq!(bit_depth, png::BitDepth::Four);
    assert_eq!(plte_len, Some(6));

    let decoded = read_image(&result.output).unwrap();
    assert_eq!((decoded.width, decoded.height), (48, 32));
    assert_palette_exact(&decoded, &Palette::E6);
}

#[test]
fn test_round_trip_preserves_pixels_for_every_method() {
    let dir = tempfile::tempdir().unwrap();
    let pixels = color_gradient(20, 12);
    let input = write_rgb_png(dir.path(), "in.png", &pixels, 20, 12);

    for method in [
        DitherMethod::FloydSteinberg,
        DitherMethod::Ordered,
        DitherMethod::None,
    ] {
        let config = AppConfig {
            method,
            ..Default::default()
        };
        let converter = config.converter();
        let expected = converter.convert(&pixels, 20, 12).unwrap();

        let out_dir = dir.path().join(method.name());
        let options = OutputOptions {
            output_dir: Some(out_dir.clone()),
            device_table: false,
            ..Default::default()
        };
        let result = convert_file(&input, &converter, &options).unwrap();
        assert_eq!(result.output, out_dir.join("in_e6.png"));

        let decoded = read_image(&result.output).unwrap();
        assert_eq!(decoded.pixels, expected.pixels(), "method {method}");
    }
}

#[test]
fn test_device_table_never_uses_skip_slot() {
    let dir = tempfile::tempdir().unwrap();
    // One block of each palette color plus a gradient
    let mut pixels: Vec<Rgb> = Palette::E6
        .colors()
        .iter()
        .flat_map(|&c| std::iter::repeat(c).take(16))
        .collect();
    pixels.extend(color_gradient(16, 10));
    let input = write_rgb_png(dir.path(), "mixed.png", &pixels, 16, 16);

    let converter = AppConfig::default().converter();
    let options = OutputOptions {
        output_dir: None,
        device_table: true,
        ..Default::default()
    };
    let result = convert_file(&input, &converter, &options).unwrap();

    let (_, _, plte_len) = png_header(&result.output);
    assert_eq!(plte_len, Some(7));

    let raw = read_raw_indices(&result.output);
    assert_eq!(raw.len(), 16 * 16);
    assert!(
        !raw.contains(&(DEVICE_SKIP_SLOT as u8)),
        "device table slot 4 must never be referenced"
    );
    assert!(raw.iter().all(|&idx| idx < 7));
    // Blue and green blocks land on slots 5 and 6
    assert_eq!(raw[4 * 16], 5);
    assert_eq!(raw[5 * 16], 6);

    let decoded = read_image(&result.output).unwrap();
    assert_palette_exact(&decoded, &Palette::E6);
}

#[test]
fn test_perceptual_palette_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_rgb_png(dir.path(), "ramp.png", &gray_ramp(64, 8), 64, 8);

    let config = AppConfig {
        palette: PaletteVariant::E6Perceptual,
        strict: true,
        ..Default::default()
    };
    let result = convert_file(&input, &config.converter(), &OutputOptions::default()).unwrap();

    let decoded = read_image(&result.output).unwrap();
    assert_palette_exact(&decoded, &Palette::E6_PERCEPTUAL);
}

#[test]
fn test_batch_converts_concurrently_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let mut inputs = Vec::new();
    for i in 0..4 {
        inputs.push(write_rgb_png(
            dir.path(),
            &format!("img{i}.png"),
            &color_gradient(10 + i, 7),
            10 + i,
            7,
        ));
    }
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"definitely not a png").unwrap();
    inputs.insert(2, broken);

    let converter = AppConfig::default().converter();
    let options = OutputOptions {
        output_dir: Some(dir.path().join("out")),
        device_table: false,
        ..Default::default()
    };
    let results = convert_batch(&inputs, &converter, &options, Some(2)).unwrap();

    assert_eq!(results.len(), 5);
    assert!(matches!(results[2], Err(ConvertError::Image { .. })));
    for (input, result) in inputs.iter().zip(&results) {
        if let Ok(file) = result {
            assert_eq!(&file.input, input);
            assert!(file.output.exists());
        }
    }
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
}

#[test]
fn test_solid_palette_image_survives_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let yellow = Rgb::new(255, 255, 0);
    let input = write_rgb_png(dir.path(), "yellow.png", &vec![yellow; 9 * 5], 9, 5);

    for method in [DitherMethod::FloydSteinberg, DitherMethod::Ordered] {
        let config = AppConfig {
            method,
            ..Default::default()
        };
        let result = convert_file(&input, &config.converter(), &OutputOptions::default()).unwrap();
        assert_eq!(result.color_counts, [0, 0, 45, 0, 0, 0], "method {method}");
    }
}

#[test]
fn test_bmp_output_holds_only_palette_triples() {
    let dir = tempfile::tempdir().unwrap();
    // Odd width exercises BMP row padding
    let pixels = color_gradient(37, 21);
    let input = write_rgb_png(dir.path(), "photo.png", &pixels, 37, 21);

    for palette in [PaletteVariant::E6, PaletteVariant::E6Perceptual] {
        let config = AppConfig {
            palette,
            format: OutputFormat::Bmp,
            ..Default::default()
        };
        let converter = config.converter();
        let options = OutputOptions {
            output_dir: Some(dir.path().join(palette.name())),
            format: config.format,
            ..Default::default()
        };
        let result = convert_file(&input, &converter, &options).unwrap();
        assert_eq!(
            result.output,
            dir.path().join(palette.name()).join("photo_e6.bmp")
        );

        let (bit_count, width, height, triples) = read_bmp_triples(&result.output);
        assert_eq!(bit_count, 24);
        assert_eq!((width, height), (37, 21));
        let stray = triples
            .iter()
            .filter(|&&c| !palette.palette().contains(c))
            .count();
        assert_eq!(stray, 0, "palette {palette}");

        let expected = converter.convert(&pixels, 37, 21).unwrap();
        assert_eq!(triples, expected.pixels());

        let report = check_file(&result.output, &palette.palette()).unwrap();
        assert!(report.is_compatible());
    }
}
