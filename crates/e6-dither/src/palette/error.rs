//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Character that is not a hex digit
    #[error("invalid hex character '{0}'")]
    InvalidCharacter(char),
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// Duplicate color found at the specified index
    #[error("duplicate color {color} at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
        /// The repeated color
        color: crate::color::Rgb,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Unknown palette variant name
    #[error("unknown palette '{0}' (expected e6 or e6-perceptual)")]
    UnknownVariant(String),
}
