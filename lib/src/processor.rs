use crate::ascii::{OutputGrid, select_ascii_chars};
use crate::config::ConvertConfig;
use crate::edges::EdgeDetector;
use crate::error::{ConvertError, Result};
use crate::filters::{extract_luminance, sobel_filter};
use crate::lut::{Palette, PaletteRegistry};
use image::DynamicImage;
use std::time::Instant;

/// Height-to-width compensation for glyph cells being taller than wide
pub const CELL_ASPECT: f64 = 0.55;

/// Output grid dimensions for a source image
///
/// `rows = round(columns * source_height / source_width * 0.55)`, at least 1.
///
/// # Arguments
/// * `source_width` - Source image width in pixels
/// * `source_height` - Source image height in pixels
/// * `columns` - Requested output width in characters
///
/// # Returns
/// `(columns, rows)`, or `InvalidDimensions` if any input is zero
pub fn output_dimensions(source_width: u32, source_height: u32, columns: u32) -> Result<(u32, u32)> {
    if source_width == 0 || source_height == 0 || columns == 0 {
        return Err(ConvertError::InvalidDimensions {
            width: source_width,
            height: source_height,
        });
    }

    let aspect_ratio = source_height as f64 / source_width as f64;
    let rows = (columns as f64 * aspect_ratio * CELL_ASPECT).round();
    let rows = rows.clamp(1.0, u32::MAX as f64) as u32;

    Ok((columns, rows))
}

/// Image to text converter holding an injected palette registry
///
/// Stateless across calls; one converter can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    registry: PaletteRegistry,
}

impl Converter {
    pub fn new(registry: PaletteRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PaletteRegistry {
        &self.registry
    }

    /// Converts an image and serializes the grid, one line per row
    pub fn convert(&self, image: &DynamicImage, config: &ConvertConfig) -> Result<String> {
        self.convert_grid(image, config).map(|grid| grid.to_string())
    }

    /// Converts an image to a grid of glyphs
    ///
    /// Pipeline:
    /// 1. Derive the output grid from the source aspect ratio
    /// 2. Resize to the supersampled grid and extract luminance
    /// 3. Sobel gradients over the whole field (when edge detection is on)
    /// 4. Per cell: edge stroke if the cell is edge-dominated, otherwise a
    ///    palette glyph from the Gaussian-weighted brightness
    ///
    /// # Arguments
    /// * `image` - Decoded source raster; never mutated
    /// * `config` - Conversion parameters
    ///
    /// # Returns
    /// A grid of exactly `config.width` columns, or the first error found
    pub fn convert_grid(&self, image: &DynamicImage, config: &ConvertConfig) -> Result<OutputGrid> {
        config.validate()?;
        let started = Instant::now();

        let (columns, rows) = output_dimensions(image.width(), image.height(), config.width)?;
        let palette = self.resolve_palette(config)?;

        let factor = config.sampling_factor;
        let overflow = || ConvertError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        };
        let field_width = columns.checked_mul(factor).ok_or_else(overflow)?;
        let field_height = rows.checked_mul(factor).ok_or_else(overflow)?;

        log::debug!(
            "converting {}x{} source to {}x{} cells via {}x{} luminance field",
            image.width(),
            image.height(),
            columns,
            rows,
            field_width,
            field_height
        );

        // Step 1: Luminance at supersampled resolution
        let lum = extract_luminance(image, field_width, field_height);

        // Step 2: Gradient field, only when edges are requested
        let field = config.edge_detection.then(|| sobel_filter(&lum));
        let detector = field
            .as_ref()
            .map(|field| EdgeDetector::new(field, config.edge_threshold as f32));

        // Step 3: Glyph per cell
        let grid = select_ascii_chars(&lum, detector.as_ref(), palette, factor, columns, rows);

        log::trace!(
            "converted to {}x{} grid in {:.2} ms",
            columns,
            rows,
            started.elapsed().as_secs_f64() * 1000.0
        );

        Ok(grid)
    }

    fn resolve_palette(&self, config: &ConvertConfig) -> Result<&Palette> {
        let (palette, fell_back) = self.registry.resolve(&config.char_set);
        if !fell_back {
            return Ok(palette);
        }
        if config.strict_palette {
            return Err(ConvertError::UnsupportedPalette(config.char_set.clone()));
        }

        log::warn!(
            "unknown palette {:?}, falling back to {:?}",
            config.char_set,
            crate::lut::DEFAULT_PALETTE
        );
        Ok(palette)
    }
}

/// Converts an image with the built-in palettes
///
/// # Example
/// ```no_run
/// use glyphcast::{ConvertConfig, convert};
///
/// let image = image::open("photo.jpg").unwrap();
/// let text = convert(&image, &ConvertConfig::default().with_width(100)).unwrap();
/// print!("{text}");
/// ```
pub fn convert(image: &DynamicImage, config: &ConvertConfig) -> Result<String> {
    Converter::default().convert(image, config)
}
