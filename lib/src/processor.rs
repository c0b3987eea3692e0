use crate::Rgba16Image;
use crate::ascii::{img_to_ascii, img_to_ascii_coloured, img_to_preview};
use crate::config::AsciiConfig;
use crate::scale::resample;
use image::DynamicImage;
use std::time::Instant;

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The image after rescaling, for callers that keep a copy
    pub scaled: Rgba16Image,
    /// The rendered text block
    pub text: String,
}

/// Converts a decoded image to character art
///
/// Pipeline:
/// 1. Widen to 16-bit RGBA
/// 2. Resample to the geometry resolved from `config.scale`
/// 3. Map every pixel to a glyph, with background escapes when
///    `config.colourise` is set
///
/// # Arguments
/// * `input` - The decoded image, any pixel format
/// * `config` - Sizing, algorithm and rendering switches
///
/// # Returns
/// The scaled image together with the text block
pub fn process_image(input: &DynamicImage, config: &AsciiConfig) -> Conversion {
    process_rgba16(&input.to_rgba16(), config)
}

/// Same as [`process_image`] for an image already in the working format
pub fn process_rgba16(input: &Rgba16Image, config: &AsciiConfig) -> Conversion {
    let start = Instant::now();

    // Step 1: Resample
    let scaled = resample(input, &config.scale);

    // Step 2: Map pixels to glyphs
    let text = if config.colourise {
        img_to_ascii_coloured(&scaled, config.reverse_tone, config.mirror)
    } else {
        img_to_ascii(&scaled, config.reverse_tone, config.mirror)
    };

    log::debug!(
        "converted {}x{} -> {}x{} in {:.1} ms",
        input.width(),
        input.height(),
        scaled.width(),
        scaled.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Conversion { scaled, text }
}

/// Renders a decoded image as true-colour blocks for terminal preview
///
/// Uses `config.scale` (normally fit-to-window sizing) and
/// `config.preview_single_spacing`; tone and mirror switches do not apply.
pub fn process_preview(input: &DynamicImage, config: &AsciiConfig) -> Conversion {
    let start = Instant::now();
    let input = input.to_rgba16();

    // Step 1: Resample
    let scaled = resample(&input, &config.scale);

    // Step 2: Colour blocks
    let text = img_to_preview(&scaled, config.preview_single_spacing);

    log::debug!(
        "preview {}x{} -> {}x{} in {:.1} ms",
        input.width(),
        input.height(),
        scaled.width(),
        scaled.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Conversion { scaled, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScaleOptions, ScalingAlgorithm, Sizing};
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_process_white_pixel() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])));
        let output = process_image(&img, &AsciiConfig::default());
        assert_eq!(output.text, " ");
        assert_eq!(output.scaled.dimensions(), (1, 1));
    }

    #[test]
    fn test_process_black_pixel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        let output = process_image(&img, &AsciiConfig::default());
        assert_eq!(output.text, "Ñ");
    }

    #[test]
    fn test_process_explicit_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([90, 90, 90])));
        let config = AsciiConfig {
            scale: ScaleOptions::from_raw(10, 4, 1.0)
                .unwrap()
                .with_algorithm(ScalingAlgorithm::Bilinear),
            ..Default::default()
        };
        let output = process_image(&img, &config);
        assert_eq!(output.scaled.dimensions(), (10, 4));
        let rows: Vec<&str> = output.text.split('\n').collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.chars().count() == 10));
    }

    #[test]
    fn test_process_coloured() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 1, Rgb([255, 0, 0])));
        let config = AsciiConfig {
            colourise: true,
            ..Default::default()
        };
        let output = process_image(&img, &config);
        assert!(output.text.starts_with("\x1b[48;2;255;0;0m"));
        assert!(output.text.ends_with("\x1b[0m\x1b[0m"));
    }

    #[test]
    fn test_process_deterministic() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(200, 150, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        }));
        let config = AsciiConfig {
            scale: ScaleOptions {
                sizing: Sizing::Factor(0.37),
                algorithm: ScalingAlgorithm::CatmullRom,
            },
            mirror: true,
            ..Default::default()
        };
        let first = process_image(&img, &config);
        let second = process_image(&img, &config);
        assert_eq!(first.text, second.text);
        assert_eq!(first.scaled, second.scaled);
    }

    #[test]
    fn test_preview_fits_window() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1408, 940, Rgb([1, 2, 3])));
        let config = AsciiConfig {
            scale: ScaleOptions::window(200, 55, 1.0, false),
            ..Default::default()
        };
        let output = process_preview(&img, &config);
        assert_eq!(output.scaled.dimensions(), (82, 55));
        assert_eq!(output.text.split('\n').count(), 55);
    }

    #[test]
    fn test_preview_single_spacing() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 0, 0])));
        let config = AsciiConfig {
            preview_single_spacing: true,
            ..Default::default()
        };
        assert_eq!(process_preview(&img, &config).text, "\x1b[48;2;0;0;0m \x1b[0m");
    }
}
