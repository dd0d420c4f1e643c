use std::path::PathBuf;

use e6_dither::DitherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown output format '{0}' (expected png or bmp)")]
pub struct ParseFormatError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        source: ImageIoError,
    },

    #[error("{path}: {source}")]
    Dither {
        path: PathBuf,
        source: DitherError,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_io_error_unsupported_dimensions() {
        let error = ImageIoError::UnsupportedDimensions {
            width: 0,
            height: 480,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x480");
    }

    #[test]
    fn test_image_io_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: ImageIoError = io.into();
        assert_eq!(error.to_string(), "IO error: missing");
    }

    #[test]
    fn test_parse_format_error() {
        let error = ParseFormatError("tiff".to_string());
        assert_eq!(
            error.to_string(),
            "unknown output format 'tiff' (expected png or bmp)"
        );
    }

    #[test]
    fn test_config_error_read() {
        let error = ConfigError::Read {
            path: PathBuf::from("e6.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "Failed to read config e6.yaml: not found");
    }

    #[test]
    fn test_convert_error_names_file() {
        let error = ConvertError::Dither {
            path: PathBuf::from("photo.png"),
            source: DitherError::Incompatible { count: 3 },
        };
        assert_eq!(
            error.to_string(),
            "photo.png: 3 pixels are not palette colors"
        );
    }
}
