//! Character lookup tables
//!
//! Brightness palettes are ordered darkest to brightest. Directional stroke
//! glyphs are fixed and do not depend on the selected palette.

use crate::edges::EdgeDirection;
use crate::error::{ConvertError, Result};
use std::collections::BTreeMap;

/// Name of the palette used when a lookup misses
pub const DEFAULT_PALETTE: &str = "enhanced";

/// 70-level ramp
pub const ENHANCED_CHARS: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// 10-level ramp
pub const STANDARD_CHARS: &str = " .:-=+*#%@";

/// 5-level ramp
pub const SIMPLE_CHARS: &str = " .oO@";

/// Stroke glyphs, indexed by [`EdgeDirection`]
pub const EDGE_CHARS: [char; 4] = [
    '-',  // Horizontal
    '|',  // Vertical
    '/',  // Rising
    '\\', // Falling
];

/// Get the stroke glyph for an edge direction
pub fn get_edge_char(direction: EdgeDirection) -> char {
    match direction {
        EdgeDirection::Horizontal => EDGE_CHARS[0],
        EdgeDirection::Vertical => EDGE_CHARS[1],
        EdgeDirection::Rising => EDGE_CHARS[2],
        EdgeDirection::Falling => EDGE_CHARS[3],
    }
}

/// Ordered, non-empty glyph ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from its glyphs, darkest first
    ///
    /// Returns `None` for an empty sequence.
    pub fn new(glyphs: &str) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        (!glyphs.is_empty()).then_some(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Quantize a brightness value to a palette index
    ///
    /// `index = clamp(round(v * (N - 1) / 255), 0, N - 1)`. Values outside
    /// `[0, 255]` and NaN clamp instead of failing.
    pub fn index_for(&self, value: f32) -> usize {
        let last = self.glyphs.len().saturating_sub(1);
        let scaled = (value * last as f32 / 255.0).round();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    /// Get the glyph for a brightness value in `[0, 255]`
    pub fn glyph_for(&self, value: f32) -> char {
        self.glyphs[self.index_for(value)]
    }
}

/// Read-only name to palette map handed to the converter
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: BTreeMap<String, Palette>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    /// Registry holding `enhanced`, `standard` and `simple`
    pub fn builtin() -> Self {
        let palettes = [
            (DEFAULT_PALETTE, ENHANCED_CHARS),
            ("standard", STANDARD_CHARS),
            ("simple", SIMPLE_CHARS),
        ]
        .into_iter()
        .filter_map(|(name, chars)| Some((name.to_string(), Palette::new(chars)?)))
        .collect();

        Self { palettes }
    }

    /// Add or replace a named palette
    pub fn with_palette(mut self, name: impl Into<String>, glyphs: &str) -> Result<Self> {
        let name = name.into();
        match Palette::new(glyphs) {
            Some(palette) => {
                self.palettes.insert(name, palette);
                Ok(self)
            }
            None => Err(ConvertError::UnsupportedPalette(name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    /// Palette used when a name is unknown
    pub fn fallback(&self) -> &Palette {
        // builtin() seeds the default and with_palette never removes entries
        &self.palettes[DEFAULT_PALETTE]
    }

    /// Look up a palette, falling back to the default
    ///
    /// The flag is true when the fallback was taken.
    pub fn resolve(&self, name: &str) -> (&Palette, bool) {
        match self.get(name) {
            Some(palette) => (palette, false),
            None => (self.fallback(), true),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}
