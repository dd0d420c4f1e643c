//! File-level conversion and checking, with concurrent batches.

use std::path::{Path, PathBuf};

use e6_dither::{check_compatibility, CompatibilityReport, E6Converter, Palette, PALETTE_LEN};
use rayon::prelude::*;

use crate::error::{ConvertError, ImageIoError};
use crate::image_io::{read_image, write_image, OutputFormat};

/// Suffix appended to the input stem for converted files.
pub const OUTPUT_SUFFIX: &str = "_e6";

/// Where and how converted files are written.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output directory; `None` writes next to each input.
    pub output_dir: Option<PathBuf>,
    /// Container format of the written files.
    pub format: OutputFormat,
    /// Encode PNG output against the 7-slot firmware table.
    pub device_table: bool,
}

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub color_counts: [usize; PALETTE_LEN],
}

/// Output path for `input`: `<stem>_e6.<ext>` in `output_dir`, or beside
/// the input when no directory is given.
pub fn output_path(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{stem}{OUTPUT_SUFFIX}.{}", format.extension());
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Convert one PNG or BMP file and write the result.
pub fn convert_file(
    input: &Path,
    converter: &E6Converter,
    options: &OutputOptions,
) -> Result<ConvertedFile, ConvertError> {
    let image_err = |source: ImageIoError| ConvertError::Image {
        path: input.to_path_buf(),
        source,
    };

    let decoded = read_image(input).map_err(image_err)?;
    tracing::debug!(
        input = %input.display(),
        width = decoded.width,
        height = decoded.height,
        "Decoded image"
    );

    let converted = converter
        .convert(&decoded.pixels, decoded.width, decoded.height)
        .map_err(|source| ConvertError::Dither {
            path: input.to_path_buf(),
            source,
        })?;

    let output = output_path(input, options.output_dir.as_deref(), options.format);
    if let Some(dir) = &options.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| image_err(e.into()))?;
    }
    write_image(&output, &converted, options.format, options.device_table).map_err(image_err)?;

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output,
        width: converted.width(),
        height: converted.height(),
        color_counts: converted.color_counts(),
    })
}

/// Convert several files concurrently.
///
/// `jobs` caps the number of worker threads; `None` uses one per CPU.
/// Results come back in input order. A failing file does not stop the
/// others.
pub fn convert_batch(
    inputs: &[PathBuf],
    converter: &E6Converter,
    options: &OutputOptions,
    jobs: Option<usize>,
) -> Result<Vec<Result<ConvertedFile, ConvertError>>, ConvertError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()?;

    Ok(pool.install(|| {
        inputs
            .par_iter()
            .map(|input| convert_file(input, converter, options))
            .collect()
    }))
}

/// Decode a PNG or BMP and report how well it matches `palette`.
pub fn check_file(path: &Path, palette: &Palette) -> Result<CompatibilityReport, ImageIoError> {
    let image = read_image(path)?;
    Ok(check_compatibility(
        &image.pixels,
        image.width,
        image.height,
        palette,
    ))
}

/// Incompatible pixels listed per file by default.
pub const CHECK_LIST_LIMIT: usize = 10;

/// One line per incompatible pixel, `(x, y) (r, g, b)`, in raster order.
///
/// With a `limit`, the list stops there and a final line counts the rest.
pub fn incompatible_listing(report: &CompatibilityReport, limit: Option<usize>) -> Vec<String> {
    let shown = limit.unwrap_or(usize::MAX);
    let mut lines: Vec<String> = report
        .incompatible
        .iter()
        .take(shown)
        .map(|p| format!("({}, {}) {}", p.x, p.y, p.color))
        .collect();
    let hidden = report.incompatible.len().saturating_sub(shown);
    if hidden > 0 {
        lines.push(format!("... and {hidden} more (use --all to list them)"));
    }
    lines
}
