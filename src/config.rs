use std::path::Path;

use e6_dither::{DitherMethod, E6Converter, OptimizerOptions, PaletteVariant};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::image_io::OutputFormat;

/// Conversion settings loaded from a YAML file.
///
/// Every field is optional in the file; missing ones take the defaults
/// below. Command-line flags are layered on top with [`AppConfig::apply`].
///
/// ```yaml
/// method: ordered          # floyd | ordered | none
/// optimize: true
/// strict: false
/// palette: e6              # e6 | e6-perceptual
/// preserve_exact_matches: true
/// format: png              # png | bmp
/// device_table: false      # write the 7-slot firmware color table
/// optimizer:
///   spread_threshold: 80
///   snap: true
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Dither method
    pub method: DitherMethod,

    /// Run the color optimizer before dithering
    pub optimize: bool,

    /// Fail a file if any non-palette pixel survives validation
    pub strict: bool,

    /// Target palette
    pub palette: PaletteVariant,

    /// Keep pixels that already equal a palette color (ordered dithering)
    pub preserve_exact_matches: bool,

    /// Container format of converted files
    pub format: OutputFormat,

    /// Encode indices against the 7-slot firmware table instead of a
    /// 6-entry PLTE (PNG only)
    pub device_table: bool,

    /// Optimizer thresholds and factors
    pub optimizer: OptimizerOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            method: DitherMethod::FloydSteinberg,
            optimize: true,
            strict: false,
            palette: PaletteVariant::E6,
            preserve_exact_matches: true,
            format: OutputFormat::Png,
            device_table: false,
            optimizer: OptimizerOptions::default(),
        }
    }
}

/// Command-line values that override the config file.
///
/// `None` and `false` leave the file value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub method: Option<DitherMethod>,
    pub no_dither: bool,
    pub no_optimize: bool,
    pub strict: bool,
    pub palette: Option<PaletteVariant>,
    pub format: Option<OutputFormat>,
    pub device_table: bool,
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load a config file if one is given, falling back to defaults when it
    /// is missing or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    method = %config.method,
                    palette = %config.palette,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Layer command-line flags on top of this configuration.
    pub fn apply(&mut self, overrides: &CliOverrides) {
        if let Some(method) = overrides.method {
            self.method = method;
        }
        if overrides.no_dither {
            self.method = DitherMethod::None;
        }
        if overrides.no_optimize {
            self.optimize = false;
        }
        if overrides.strict {
            self.strict = true;
        }
        if let Some(palette) = overrides.palette {
            self.palette = palette;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if overrides.device_table {
            self.device_table = true;
        }
    }

    /// Build the converter these settings describe.
    pub fn converter(&self) -> E6Converter {
        E6Converter::new(self.palette.palette())
            .method(self.method)
            .optimize(self.optimize)
            .optimizer_options(self.optimizer.clone())
            .preserve_exact_matches(self.preserve_exact_matches)
            .strict(self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e6_dither::Palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.method, DitherMethod::FloydSteinberg);
        assert!(config.optimize);
        assert!(!config.strict);
        assert_eq!(config.palette, PaletteVariant::E6);
        assert!(config.preserve_exact_matches);
        assert_eq!(config.format, OutputFormat::Png);
        assert!(!config.device_table);
    }

    #[test]
    fn test_config_parsing() {
        let yaml = r#"
method: bayer
optimize: false
strict: true
palette: e6-perceptual
device_table: true
optimizer:
  spread_threshold: 60
  snap: false
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.method, DitherMethod::Ordered);
        assert!(!config.optimize);
        assert!(config.strict);
        assert_eq!(config.palette, PaletteVariant::E6Perceptual);
        assert!(config.device_table);
        assert!(config.preserve_exact_matches);
        assert_eq!(config.optimizer.spread_threshold, 60.0);
        assert!(!config.optimizer.snap);
        // Unspecified optimizer fields keep their defaults
        assert_eq!(config.optimizer.enhance_factor, 1.15);
    }

    #[test]
    fn test_config_method_aliases() {
        for (name, method) in [
            ("floyd", DitherMethod::FloydSteinberg),
            ("floyd-steinberg", DitherMethod::FloydSteinberg),
            ("error-diffusion", DitherMethod::FloydSteinberg),
            ("ordered", DitherMethod::Ordered),
            ("none", DitherMethod::None),
        ] {
            let config = AppConfig::from_yaml(&format!("method: {name}")).unwrap();
            assert_eq!(config.method, method, "method name {name}");
        }
    }

    #[test]
    fn test_config_empty_document() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("\n  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_config_invalid() {
        assert!(matches!(
            AppConfig::from_yaml("method: halftone"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Some(Path::new("/nonexistent/e6conv.yaml")));
        assert_eq!(config, AppConfig::default());
        assert_eq!(AppConfig::load_or_default(None), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e6conv.yaml");
        std::fs::write(&path, "method: none\npalette: perceptual\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.method, DitherMethod::None);
        assert_eq!(config.palette, PaletteVariant::E6Perceptual);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::from_yaml("method: ordered\npalette: e6-perceptual").unwrap();

        config.apply(&CliOverrides::default());
        assert_eq!(config.method, DitherMethod::Ordered);

        config.apply(&CliOverrides {
            method: Some(DitherMethod::FloydSteinberg),
            no_optimize: true,
            strict: true,
            palette: Some(PaletteVariant::E6),
            device_table: true,
            ..Default::default()
        });
        assert_eq!(config.method, DitherMethod::FloydSteinberg);
        assert!(!config.optimize);
        assert!(config.strict);
        assert_eq!(config.palette, PaletteVariant::E6);
        assert!(config.device_table);

        config.apply(&CliOverrides {
            no_dither: true,
            ..Default::default()
        });
        assert_eq!(config.method, DitherMethod::None);
    }

    #[test]
    fn test_output_format_from_file_and_flag() {
        let mut config = AppConfig::from_yaml("format: bmp").unwrap();
        assert_eq!(config.format, OutputFormat::Bmp);

        config.apply(&CliOverrides::default());
        assert_eq!(config.format, OutputFormat::Bmp);

        config.apply(&CliOverrides {
            format: Some(OutputFormat::Png),
            ..Default::default()
        });
        assert_eq!(config.format, OutputFormat::Png);

        assert!(matches!(
            AppConfig::from_yaml("format: gif"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_converter_from_config() {
        let config = AppConfig {
            palette: PaletteVariant::E6Perceptual,
            method: DitherMethod::Ordered,
            ..Default::default()
        };
        let converter = config.converter();
        assert_eq!(converter.palette(), &Palette::E6_PERCEPTUAL);
        assert_eq!(converter.dither_method(), DitherMethod::Ordered);
    }
}
