use asciify::scale::{fit_to_window_factor, resample};
use asciify::{ScaleOptions, ScalingAlgorithm, Sizing};
use asciify::{Rgba16Image, ascii::img_to_ascii};
use image::Rgba;
use std::time::Instant;

fn main() {
    println!("asciify - Resampling Demo");
    println!("=========================\n");

    let test_cases = vec![
        (Sizing::Factor(0.05), "factor 0.05"),
        (Sizing::Explicit { width: 48, height: 16 }, "explicit 48x16"),
        (
            Sizing::FitToWindow {
                max_width: 60,
                max_height: 20,
                factor: 1.0,
            },
            "fit within 60x20",
        ),
    ];

    // Diagonal gradient
    let (width, height) = (1280, 720);
    let img = Rgba16Image::from_fn(width, height, |x, y| {
        let v = ((x + y) * 65535 / (width + height)) as u16;
        Rgba([v, v, v, 65535])
    });

    let (factor, from_bounds) = fit_to_window_factor(width, height, 60, 20, 1.0);
    println!("Fit-to-window factor for 60x20: {:.4} (bound-derived: {})\n", factor, from_bounds);

    for (sizing, description) in test_cases {
        println!("Testing: {}", description);
        for algorithm in ScalingAlgorithm::ORDER {
            let start = Instant::now();
            let scaled = resample(&img, &ScaleOptions { sizing, algorithm });
            println!(
                "  {:<22} {}x{} in {:.1} ms",
                algorithm.name(),
                scaled.width(),
                scaled.height(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
        let scaled = resample(&img, &ScaleOptions { sizing, algorithm: ScalingAlgorithm::CatmullRom });
        println!("{}\n", img_to_ascii(&scaled, false, false));
    }
}
