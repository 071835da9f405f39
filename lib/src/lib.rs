//! glyphcast - image to ASCII text converter
//!
//! Converts a decoded raster into a block of monospaced text. Each output
//! cell is drawn either as a directional stroke, when Sobel edges dominate
//! its source region, or as a palette glyph chosen from Gaussian-weighted
//! brightness at a supersampled resolution.
//!
//! The crate performs no I/O: decoding input bytes and writing the result
//! belong to the caller.
//!
//! # Example
//! ```no_run
//! use glyphcast::{ConvertConfig, Converter};
//!
//! let image = image::open("photo.jpg").unwrap();
//! let config = ConvertConfig::default().with_width(100).with_char_set("standard");
//! let text = Converter::default().convert(&image, &config).unwrap();
//! print!("{text}");
//! ```

pub mod ascii;
pub mod config;
pub mod edges;
pub mod error;
pub mod filters;
pub mod lut;
pub mod processor;

// Re-export main types for convenience
pub use ascii::OutputGrid;
pub use config::ConvertConfig;
pub use error::{ConvertError, Result};
pub use lut::{Palette, PaletteRegistry};
pub use processor::{Converter, convert, output_dimensions};
