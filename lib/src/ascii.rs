use crate::edges::EdgeDetector;
use crate::filters::gaussian_weights;
use crate::lut::{Palette, get_edge_char};
use image::GrayImage;
use rayon::prelude::*;
use std::fmt;

/// Source rectangle of one output cell in the supersampled grid
///
/// Half-open on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CellRect {
    /// Rectangle covered by output cell `(x, y)` at the given sampling factor,
    /// clipped to the field bounds
    pub fn for_cell(x: u32, y: u32, factor: u32, field_width: u32, field_height: u32) -> Self {
        Self {
            x0: x * factor,
            y0: y * factor,
            x1: ((x + 1) * factor).min(field_width),
            y1: ((y + 1) * factor).min(field_height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Gaussian-weighted mean luminance of a cell
///
/// # Arguments
/// * `lum` - Supersampled luminance field
/// * `rect` - Cell rectangle inside `lum`
/// * `weights` - Normalized weights laid out for `rect`'s width and height
///
/// # Returns
/// Brightness in `[0, 255]`; 0 for an empty rectangle
pub fn weighted_cell_luminance(lum: &GrayImage, rect: CellRect, weights: &[f32]) -> f32 {
    let cell_width = rect.width() as usize;
    debug_assert_eq!(weights.len(), rect.area());

    let mut sum = 0.0;
    for (row, py) in (rect.y0..rect.y1).enumerate() {
        for (col, px) in (rect.x0..rect.x1).enumerate() {
            sum += weights[row * cell_width + col] * lum.get_pixel(px, py)[0] as f32;
        }
    }

    sum.clamp(0.0, 255.0)
}

/// Select the glyph for one cell
///
/// Edge strokes win over brightness when a detector is supplied and claims
/// the cell; the brightness path is skipped entirely in that case.
/// `weights` must be laid out for `rect`'s width and height.
pub fn select_ascii_char(
    lum: &GrayImage,
    edges: Option<&EdgeDetector<'_>>,
    palette: &Palette,
    rect: CellRect,
    weights: &[f32],
    scratch: &mut Vec<f32>,
) -> char {
    if let Some(direction) = edges.and_then(|detector| detector.classify_cell(rect, scratch)) {
        return get_edge_char(direction);
    }

    palette.glyph_for(weighted_cell_luminance(lum, rect, weights))
}

/// Select glyphs for every cell of the output grid
///
/// Rows are rendered in parallel. Each worker keeps its own direction
/// buffer for the median and writes only its own row.
///
/// # Arguments
/// * `lum` - Supersampled luminance field, `columns * factor` by `rows * factor`
/// * `edges` - Edge detector, or `None` when edge detection is off
/// * `palette` - Brightness palette
/// * `factor` - Sampling factor
/// * `columns` - Output width in cells
/// * `rows` - Output height in cells
pub fn select_ascii_chars(
    lum: &GrayImage,
    edges: Option<&EdgeDetector<'_>>,
    palette: &Palette,
    factor: u32,
    columns: u32,
    rows: u32,
) -> OutputGrid {
    let (field_width, field_height) = lum.dimensions();
    let weights = gaussian_weights(factor, factor);

    let grid: Vec<Vec<char>> = (0..rows)
        .into_par_iter()
        .map_init(Vec::<f32>::new, |scratch, y| {
            (0..columns)
                .map(|x| {
                    let rect = CellRect::for_cell(x, y, factor, field_width, field_height);
                    select_ascii_char(lum, edges, palette, rect, &weights, scratch)
                })
                .collect::<Vec<char>>()
        })
        .collect();

    OutputGrid { rows: grid }
}

/// Rows of glyphs, one `char` per output cell
///
/// `Display` writes each row followed by a line break, including the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid {
    rows: Vec<Vec<char>>,
}

impl OutputGrid {
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[char]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Glyph at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y)?.get(x).copied()
    }
}

impl fmt::Display for OutputGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &ch in row {
                fmt::Write::write_char(f, ch)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
