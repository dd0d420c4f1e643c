//! Public API for the e6-dither crate.
//!
//! This module provides the high-level API: [`E6Converter`] builder and
//! [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::E6Converter;
pub use error::DitherError;
