//! e6conv - convert images for six-color E6 e-ink panels
//!
//! Thin tooling around the `e6_dither` engine: PNG decode and indexed PNG
//! encode, YAML configuration, and concurrent batch conversion.
//! This library exposes modules for integration testing.

pub mod batch;
pub mod config;
pub mod error;
pub mod image_io;
