use thiserror::Error;

/// Errors surfaced by a conversion call
///
/// Image decoding failures are not represented here: the caller decodes and
/// hands over a ready raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Zero-sized source image or a non-positive requested width
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("sampling factor must be between 1 and 16, got {0}")]
    InvalidSamplingFactor(u32),

    /// Only returned when strict palette lookup is enabled
    #[error("unsupported palette: {0:?}")]
    UnsupportedPalette(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
