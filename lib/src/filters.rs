use crate::edges::EdgeField;
use image::{DynamicImage, GrayImage, Luma, RgbaImage, imageops};
use rayon::prelude::*;

/// BT.601 luma weights for R, G, B
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Standard deviation of the per-cell Gaussian, in cell-size units
pub const CELL_SIGMA: f32 = 0.5;

/// Luma of a single RGB triple, rounded to the nearest level
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = LUMA_WEIGHTS[0] * r as f32 + LUMA_WEIGHTS[1] * g as f32 + LUMA_WEIGHTS[2] * b as f32;
    l.round().clamp(0.0, 255.0) as u8
}

/// Calculate luminance from an RGBA image
///
/// Alpha is ignored.
pub fn calculate_luminance(img: &RgbaImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        output.put_pixel(x, y, Luma([luma(pixel[0], pixel[1], pixel[2])]));
    }

    output
}

/// Resize a source image to the supersampled grid and reduce it to luma
///
/// Resizing uses Lanczos3 and is skipped when the source already has the
/// target dimensions. Single-channel sources are resized as-is.
///
/// # Arguments
/// * `image` - Decoded source raster
/// * `width` - Target width (output columns times sampling factor)
/// * `height` - Target height (output rows times sampling factor)
///
/// # Returns
/// Grayscale image of exactly `width x height`
pub fn extract_luminance(image: &DynamicImage, width: u32, height: u32) -> GrayImage {
    let same_size = image.width() == width && image.height() == height;

    match image {
        DynamicImage::ImageLuma8(gray) if same_size => gray.clone(),
        DynamicImage::ImageLuma8(gray) => {
            imageops::resize(gray, width, height, imageops::FilterType::Lanczos3)
        }
        other => {
            let rgba = other.to_rgba8();
            if same_size {
                calculate_luminance(&rgba)
            } else {
                let resized = imageops::resize(&rgba, width, height, imageops::FilterType::Lanczos3);
                calculate_luminance(&resized)
            }
        }
    }
}

/// Normalized Gaussian weights for a `width x height` cell, row-major
///
/// Distances are measured from each pixel's center to the cell center and
/// expressed as fractions of the cell size, so the kernel shape does not
/// depend on how many pixels the cell spans.
pub fn gaussian_weights(width: u32, height: u32) -> Vec<f32> {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let two_sigma_sq = 2.0 * CELL_SIGMA * CELL_SIGMA;

    let mut weights = Vec::with_capacity((width * height) as usize);
    for by in 0..height {
        for bx in 0..width {
            let dx = (bx as f32 - center_x + 0.5) / width as f32;
            let dy = (by as f32 - center_y + 0.5) / height as f32;
            weights.push((-(dx * dx + dy * dy) / two_sigma_sq).exp());
        }
    }

    let total: f32 = weights.iter().sum();
    if total > 0.0 {
        weights.iter_mut().for_each(|w| *w /= total);
    }
    weights
}

/// Apply 3x3 Sobel kernels over the whole luminance field
///
/// Borders replicate the nearest valid pixel. Rows are processed in
/// parallel; each worker writes only its own row.
///
/// ```text
/// Gx:              Gy:
/// [-1  0  1]       [-1 -2 -1]
/// [-2  0  2]       [ 0  0  0]
/// [-1  0  1]       [ 1  2  1]
/// ```
pub fn sobel_filter(lum: &GrayImage) -> EdgeField {
    let (width, height) = lum.dimensions();
    let row_len = width as usize;
    let size = row_len * height as usize;
    let src = lum.as_raw();

    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;
    let sample = |x: i64, y: i64| -> f32 {
        let cx = x.clamp(0, max_x) as usize;
        let cy = y.clamp(0, max_y) as usize;
        src[cy * row_len + cx] as f32
    };

    let mut magnitude = vec![0.0; size];
    let mut direction = vec![0.0; size];

    if size > 0 {
        magnitude
            .par_chunks_mut(row_len)
            .zip(direction.par_chunks_mut(row_len))
            .enumerate()
            .for_each(|(y, (mag_row, dir_row))| {
                let y = y as i64;
                for x in 0..row_len {
                    let xi = x as i64;
                    let nw = sample(xi - 1, y - 1);
                    let n = sample(xi, y - 1);
                    let ne = sample(xi + 1, y - 1);
                    let w = sample(xi - 1, y);
                    let e = sample(xi + 1, y);
                    let sw = sample(xi - 1, y + 1);
                    let s = sample(xi, y + 1);
                    let se = sample(xi + 1, y + 1);

                    let gx = -nw + ne - 2.0 * w + 2.0 * e - sw + se;
                    let gy = -nw - 2.0 * n - ne + sw + 2.0 * s + se;

                    mag_row[x] = (gx * gx + gy * gy).sqrt();
                    dir_row[x] = gy.atan2(gx);
                }
            });
    }

    EdgeField {
        width,
        height,
        magnitude,
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    #[test]
    fn test_luminance_black() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let lum = calculate_luminance(&img);
        assert_eq!(lum.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_luminance_white() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let lum = calculate_luminance(&img);
        assert_eq!(lum.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_luminance_weights_green_dominates() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let opaque = RgbaImage::from_pixel(2, 2, Rgba([90, 120, 30, 255]));
        let clear = RgbaImage::from_pixel(2, 2, Rgba([90, 120, 30, 0]));
        assert_eq!(calculate_luminance(&opaque), calculate_luminance(&clear));
    }

    #[test]
    fn test_extract_luminance_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(37, 21, Rgb([10, 20, 30])));
        let lum = extract_luminance(&img, 12, 9);
        assert_eq!(lum.dimensions(), (12, 9));
    }

    #[test]
    fn test_extract_luminance_same_size_is_exact() {
        let mut rgba = RgbaImage::from_pixel(6, 4, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(5, 3, Rgba([255, 255, 255, 255]));
        let lum = extract_luminance(&DynamicImage::ImageRgba8(rgba), 6, 4);
        assert_eq!(lum.get_pixel(5, 3)[0], 255);
        assert_eq!(lum.get_pixel(4, 3)[0], 0);
    }

    #[test]
    fn test_extract_luminance_reuses_gray_channel() {
        let gray = GrayImage::from_pixel(8, 8, Luma([77]));
        let lum = extract_luminance(&DynamicImage::ImageLuma8(gray), 8, 8);
        assert!(lum.pixels().all(|p| p[0] == 77));
    }

    #[test]
    fn test_gaussian_weights_normalized() {
        for (w, h) in [(1, 1), (3, 3), (4, 2), (7, 5)] {
            let weights = gaussian_weights(w, h);
            assert_eq!(weights.len(), (w * h) as usize);
            let total: f32 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gaussian_weights_single_pixel() {
        assert_eq!(gaussian_weights(1, 1), vec![1.0]);
    }

    #[test]
    fn test_gaussian_weights_peak_at_center() {
        let weights = gaussian_weights(3, 3);
        let center = weights[4];
        assert!(weights.iter().all(|&w| w <= center));
        // Symmetric corners
        assert!((weights[0] - weights[8]).abs() < 1e-6);
        assert!((weights[2] - weights[6]).abs() < 1e-6);
    }

    #[test]
    fn test_sobel_flat_image_has_no_gradient() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let field = sobel_filter(&img);
        assert_eq!(field.dimensions(), (16, 16));
        assert!(field.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sobel_vertical_step() {
        // Left half dark, right half bright
        let img = GrayImage::from_fn(8, 4, |x, _| if x < 4 { Luma([0]) } else { Luma([255]) });
        let field = sobel_filter(&img);

        assert_eq!(field.magnitude(3, 0), 1020.0);
        assert_eq!(field.magnitude(4, 3), 1020.0);
        assert_eq!(field.magnitude(0, 0), 0.0);
        assert_eq!(field.magnitude(7, 2), 0.0);
        assert_eq!(field.direction(3, 1), 0.0);
    }

    #[test]
    fn test_sobel_horizontal_step_points_down() {
        let img = GrayImage::from_fn(4, 8, |_, y| if y < 4 { Luma([0]) } else { Luma([255]) });
        let field = sobel_filter(&img);
        let angle = field.direction(1, 3);
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_sobel_single_pixel_image() {
        let img = GrayImage::from_pixel(1, 1, Luma([200]));
        let field = sobel_filter(&img);
        assert_eq!(field.magnitude(0, 0), 0.0);
    }
}
