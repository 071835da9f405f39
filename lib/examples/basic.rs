/// Basic example: convert a synthetic scene to ASCII text
///
/// Draws a gray background, a white disc with a black rim and a diagonal
/// bar, then prints it with and without edge strokes.
use glyphcast::{ConvertConfig, Converter};
use image::{DynamicImage, Rgba, RgbaImage};

fn main() {
    println!("glyphcast - Basic Example");
    println!("=========================\n");

    let width = 240;
    let height = 160;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([100, 100, 100, 255]));

    // White disc with a black rim
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 55.0;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < radius {
            *pixel = Rgba([255, 255, 255, 255]);
        } else if (dist - radius).abs() < 5.0 {
            *pixel = Rgba([0, 0, 0, 255]);
        }
    }

    // Diagonal bar
    for i in 0..height {
        for t in 0..4 {
            img.put_pixel(i + t, i, Rgba([20, 20, 20, 255]));
        }
    }

    let image = DynamicImage::ImageRgba8(img);
    let converter = Converter::default();

    for edge_detection in [true, false] {
        let config = ConvertConfig::default()
            .with_width(72)
            .with_char_set("standard")
            .with_edge_detection(edge_detection);

        println!("edge detection: {edge_detection}");
        match converter.convert(&image, &config) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("conversion failed: {e}"),
        }
    }
}
