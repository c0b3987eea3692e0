/// Basic example: Convert a simple test image to character art
///
/// This creates a test image with some basic shapes and prints it plain,
/// negative and coloured
use asciify::{AsciiConfig, ScaleOptions, process_image};
use image::{DynamicImage, Rgba, RgbaImage};

fn main() {
    println!("asciify - Basic Example");
    println!("=======================\n");

    let width = 160;
    let height = 160;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([100, 100, 100, 255]));

    // Draw a white circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            } else if (dist - radius).abs() < 5.0 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    // Transparent top-left corner
    for y in 0..20 {
        for x in 0..20 {
            img.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        }
    }

    println!("Created test image: {}x{}", width, height);
    let input = DynamicImage::ImageRgba8(img);

    // Terminal cells are roughly twice as tall as wide
    let scale = ScaleOptions::from_raw(64, 32, 0.0).expect("valid sizing");

    let plain = process_image(&input, &AsciiConfig { scale, ..Default::default() });
    println!("\nPlain:\n{}", plain.text);

    let negative = process_image(
        &input,
        &AsciiConfig {
            scale,
            reverse_tone: true,
            ..Default::default()
        },
    );
    println!("\nNegative:\n{}", negative.text);

    let coloured = process_image(
        &input,
        &AsciiConfig {
            scale,
            colourise: true,
            ..Default::default()
        },
    );
    println!("\nColoured:\n{}", coloured.text);
}
