//! The fixed six-color palette and nearest-color mapping
//!
//! This module provides the [`Palette`] type, the named [`PaletteVariant`]s,
//! and error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteVariant, DEVICE_SKIP_SLOT, DEVICE_TABLE_LEN, PALETTE_LEN};
