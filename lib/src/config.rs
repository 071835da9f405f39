use crate::error::{ConvertError, Result};
use crate::lut::DEFAULT_PALETTE;

/// Largest accepted supersampling factor
pub const MAX_SAMPLING_FACTOR: u32 = 16;

/// Configuration for a single image to text conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Output grid
    pub width: u32,              // columns, default 80
    pub char_set: String,        // palette name, default "enhanced"

    /// Supersampling
    pub sampling_factor: u32,    // 1-16, default 3

    /// Edge detection
    pub edge_detection: bool,    // default true
    pub edge_threshold: u32,     // Sobel magnitude cutoff, default 50

    /// Reject unknown palette names instead of falling back
    pub strict_palette: bool,    // default false
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            // Output grid
            width: 80,
            char_set: DEFAULT_PALETTE.to_string(),

            // Supersampling
            sampling_factor: 3,

            // Edge detection
            edge_detection: true,
            edge_threshold: 50,

            strict_palette: false,
        }
    }
}

impl ConvertConfig {
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_char_set(mut self, char_set: impl Into<String>) -> Self {
        self.char_set = char_set.into();
        self
    }

    pub fn with_sampling_factor(mut self, sampling_factor: u32) -> Self {
        self.sampling_factor = sampling_factor;
        self
    }

    pub fn with_edge_detection(mut self, enabled: bool) -> Self {
        self.edge_detection = enabled;
        self
    }

    pub fn with_edge_threshold(mut self, threshold: u32) -> Self {
        self.edge_threshold = threshold;
        self
    }

    pub fn with_strict_palette(mut self, strict: bool) -> Self {
        self.strict_palette = strict;
        self
    }

    /// Validates the configuration parameters
    ///
    /// The palette name is not checked here; lookup happens against the
    /// converter's registry.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(ConvertError::InvalidDimensions {
                width: self.width,
                height: 0,
            });
        }
        if self.sampling_factor == 0 || self.sampling_factor > MAX_SAMPLING_FACTOR {
            return Err(ConvertError::InvalidSamplingFactor(self.sampling_factor));
        }
        Ok(())
    }
}
