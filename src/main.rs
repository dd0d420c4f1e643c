use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use e6_dither::{DitherMethod, Palette, PaletteVariant};
use e6conv::batch::{
    check_file, convert_batch, incompatible_listing, OutputOptions, CHECK_LIST_LIMIT,
};
use e6conv::config::{AppConfig, CliOverrides};
use e6conv::image_io::OutputFormat;

#[derive(Parser)]
#[command(name = "e6conv")]
#[command(version)]
#[command(about = "Convert images to palette-exact PNG or BMP files for six-color E6 e-ink panels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PNG or BMP images, writing <stem>_e6.<format> for each input
    Convert {
        /// Input PNG or BMP files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dither method: floyd, ordered or none
        #[arg(short, long)]
        method: Option<DitherMethod>,

        /// Disable dithering (nearest-color mapping only)
        #[arg(long)]
        no_dither: bool,

        /// Disable the color optimizer pass
        #[arg(long)]
        no_optimize: bool,

        /// Fail a file if any non-palette pixel survives validation
        #[arg(long)]
        strict: bool,

        /// Palette: e6 or e6-perceptual
        #[arg(long)]
        palette: Option<PaletteVariant>,

        /// Output format: png (4-bit indexed) or bmp (24-bit, firmware-readable)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write PNG indices against the 7-slot firmware color table
        #[arg(long)]
        device_table: bool,

        /// YAML config file (default: $E6CONV_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of files converted in parallel (default: one per CPU)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Check PNG or BMP files for pixels outside the palette
    Check {
        /// PNG or BMP files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// List every incompatible pixel (default: the first 10 per file)
        #[arg(long)]
        all: bool,

        /// Palette: e6 or e6-perceptual
        #[arg(long, default_value = "e6")]
        palette: PaletteVariant,
    },
    /// Print the palette and the firmware color table
    Palette {
        /// Palette: e6 or e6-perceptual
        #[arg(long, default_value = "e6")]
        palette: PaletteVariant,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "e6conv=info,e6_dither=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            method,
            no_dither,
            no_optimize,
            strict,
            palette,
            format,
            device_table,
            config,
            jobs,
        } => {
            let config_path = config.or_else(|| std::env::var("E6CONV_CONFIG").ok().map(PathBuf::from));
            let mut app_config = AppConfig::load_or_default(config_path.as_deref());
            app_config.apply(&CliOverrides {
                method,
                no_dither,
                no_optimize,
                strict,
                palette,
                format,
                device_table,
            });
            run_convert_command(&inputs, output, &app_config, jobs)
        }
        Commands::Check {
            files,
            all,
            palette,
        } => run_check_command(&files, palette.palette(), all),
        Commands::Palette { palette } => {
            run_palette_command(palette);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Convert every input, reporting per-file results
fn run_convert_command(
    inputs: &[PathBuf],
    output_dir: Option<PathBuf>,
    config: &AppConfig,
    jobs: Option<usize>,
) -> anyhow::Result<ExitCode> {
    let converter = config.converter();
    let options = OutputOptions {
        output_dir,
        format: config.format,
        device_table: config.device_table,
    };

    tracing::info!(
        files = inputs.len(),
        method = %config.method,
        palette = %config.palette,
        format = %config.format,
        optimize = config.optimize,
        "Converting"
    );

    let results = convert_batch(inputs, &converter, &options, jobs)?;

    let mut failed = 0;
    for result in &results {
        match result {
            Ok(file) => {
                tracing::info!(
                    input = %file.input.display(),
                    output = %file.output.display(),
                    width = file.width,
                    height = file.height,
                    "Converted"
                );
                println!("{} -> {}", file.input.display(), file.output.display());
            }
            Err(e) => {
                tracing::error!(%e, "Conversion failed");
                failed += 1;
            }
        }
    }

    println!(
        "Converted {} of {} files",
        results.len() - failed,
        results.len()
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a compatibility report per file; fail if any file is incompatible
fn run_check_command(files: &[PathBuf], palette: Palette, all: bool) -> anyhow::Result<ExitCode> {
    let limit = (!all).then_some(CHECK_LIST_LIMIT);
    let mut all_compatible = true;

    for path in files {
        match check_file(path, &palette) {
            Ok(report) => {
                println!("{}:", path.display());
                print!("{report}");
                for line in incompatible_listing(&report, limit) {
                    println!("  {line}");
                }
                all_compatible &= report.is_compatible();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), %e, "Check failed");
                all_compatible = false;
            }
        }
    }

    Ok(if all_compatible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print palette entries and the 7-slot device table
fn run_palette_command(variant: PaletteVariant) {
    let palette = variant.palette();

    println!("Palette {variant}:");
    for (idx, (&color, name)) in palette.colors().iter().zip(Palette::NAMES).enumerate() {
        println!(
            "  {idx}  {name:<6} {}  {color}  device slot {}",
            color.to_hex(),
            Palette::device_index(idx)
        );
    }

    println!("\nDevice table:");
    for (slot, color) in palette.device_table().iter().enumerate() {
        let note = if slot == e6_dither::DEVICE_SKIP_SLOT {
            "  (unused)"
        } else {
            ""
        };
        println!("  {slot}  {}{note}", color.to_hex());
    }
}
