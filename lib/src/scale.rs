//! Rescaling to the resolved target geometry
//!
//! Nearest neighbour and approximate bilinear are point-sampling kernels run
//! row-parallel here; bilinear and Catmull-Rom use the filtered resize from
//! `image::imageops`.

use crate::Rgba16Image;
use crate::config::{ScaleOptions, ScalingAlgorithm, Sizing};
use image::imageops::{self, FilterType};
use imageproc::definitions::Clamp;
use rayon::prelude::*;

/// Effective factor for fit-to-window sizing
///
/// Starts from `factor` and adopts the bound-derived factor of any dimension
/// the source overflows when that is smaller. The result never exceeds 1.0.
/// The second value reports whether a bound-derived factor was adopted.
pub fn fit_to_window_factor(
    src_width: u32,
    src_height: u32,
    max_width: u32,
    max_height: u32,
    factor: f64,
) -> (f64, bool) {
    let mut factor = factor;
    let mut from_bounds = false;

    if src_height > max_height {
        let hf = max_height as f64 / src_height as f64;
        if hf < factor {
            factor = hf;
            from_bounds = true;
        }
    }
    if src_width > max_width {
        let wf = max_width as f64 / src_width as f64;
        if wf < factor {
            factor = wf;
            from_bounds = true;
        }
    }

    (factor.min(1.0), from_bounds)
}

fn scaled(dimension: u32, factor: f64) -> u32 {
    // Saturating cast: negative or NaN products collapse to 0
    (dimension as f64 * factor).round() as u32
}

/// Output dimensions for `sizing` applied to a `src_width` x `src_height` source
pub fn target_dimensions(sizing: &Sizing, src_width: u32, src_height: u32) -> (u32, u32) {
    match *sizing {
        Sizing::Explicit { width, height } => (width, height),
        Sizing::Factor(factor) => (scaled(src_width, factor), scaled(src_height, factor)),
        Sizing::FitToWindow {
            max_width,
            max_height,
            factor,
        } => {
            if max_width == 0 || max_height == 0 || factor == 0.0 {
                return (scaled(src_width, factor), scaled(src_height, factor));
            }
            let (factor, _) =
                fit_to_window_factor(src_width, src_height, max_width, max_height, factor);
            (scaled(src_width, factor), scaled(src_height, factor))
        }
    }
}

/// Resample `src` according to `options`, returning a new image
pub fn resample(src: &Rgba16Image, options: &ScaleOptions) -> Rgba16Image {
    let (src_width, src_height) = src.dimensions();
    let (width, height) = target_dimensions(&options.sizing, src_width, src_height);
    log::debug!(
        "resampling {}x{} -> {}x{} ({})",
        src_width,
        src_height,
        width,
        height,
        options.algorithm
    );
    resize_to(src, width, height, options.algorithm)
}

/// Resample `src` to exactly `width` x `height` with `algorithm`
pub fn resize_to(
    src: &Rgba16Image,
    width: u32,
    height: u32,
    algorithm: ScalingAlgorithm,
) -> Rgba16Image {
    // Degenerate geometry: nothing to sample from, or nothing to fill
    if width == 0 || height == 0 || src.width() == 0 || src.height() == 0 {
        return Rgba16Image::new(width, height);
    }

    match algorithm {
        ScalingAlgorithm::NearestNeighbour => nearest_neighbour(src, width, height),
        ScalingAlgorithm::ApproxBilinear => approx_bilinear(src, width, height),
        ScalingAlgorithm::Bilinear => imageops::resize(src, width, height, FilterType::Triangle),
        ScalingAlgorithm::CatmullRom => {
            imageops::resize(src, width, height, FilterType::CatmullRom)
        }
    }
}

/// Source coordinate of the centre of destination cell `d`
fn source_centre(d: u32, dst_len: u32, src_len: u32) -> f32 {
    (d as f32 + 0.5) * src_len as f32 / dst_len as f32
}

/// Point-sample the source pixel containing each destination pixel centre
fn nearest_neighbour(src: &Rgba16Image, width: u32, height: u32) -> Rgba16Image {
    let (src_width, src_height) = src.dimensions();
    let mut output = Rgba16Image::new(width, height);
    let row_len = width as usize * 4;

    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let sy = (source_centre(y as u32, height, src_height) as u32).min(src_height - 1);
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let sx = (source_centre(x as u32, width, src_width) as u32).min(src_width - 1);
                px.copy_from_slice(&src.get_pixel(sx, sy).0);
            }
        });

    output
}

/// Bracketing source indices and weight of the upper one
fn bilinear_taps(centre: f32, src_len: u32) -> (u32, u32, f32) {
    let pos = (centre - 0.5).max(0.0);
    let lower = (pos.floor() as u32).min(src_len - 1);
    let upper = (lower + 1).min(src_len - 1);
    (lower, upper, pos - lower as f32)
}

/// Blend the 2x2 neighbourhood around each mapped pixel centre
///
/// Unlike a filtered bilinear resize this ignores every source pixel outside
/// that neighbourhood, so large reductions alias, but it is cheap.
fn approx_bilinear(src: &Rgba16Image, width: u32, height: u32) -> Rgba16Image {
    let (src_width, src_height) = src.dimensions();
    let mut output = Rgba16Image::new(width, height);
    let row_len = width as usize * 4;

    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let (y0, y1, wy) =
                bilinear_taps(source_centre(y as u32, height, src_height), src_height);
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let (x0, x1, wx) =
                    bilinear_taps(source_centre(x as u32, width, src_width), src_width);
                let tl = src.get_pixel(x0, y0).0;
                let tr = src.get_pixel(x1, y0).0;
                let bl = src.get_pixel(x0, y1).0;
                let br = src.get_pixel(x1, y1).0;

                for c in 0..4 {
                    let top = tl[c] as f32 * (1.0 - wx) + tr[c] as f32 * wx;
                    let bottom = bl[c] as f32 * (1.0 - wx) + br[c] as f32 * wx;
                    let value = top * (1.0 - wy) + bottom * wy;
                    px[c] = <u16 as Clamp<f32>>::clamp(value.round());
                }
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> Rgba16Image {
        Rgba16Image::from_fn(width, height, |x, y| {
            let v = ((x + y) * 65535 / (width + height)) as u16;
            Rgba([v, v, 65535 - v, 65535])
        })
    }

    #[test]
    fn test_factor_one_keeps_dimensions() {
        for (w, h) in [(1, 1), (17, 9), (640, 480)] {
            assert_eq!(target_dimensions(&Sizing::Factor(1.0), w, h), (w, h));
        }
    }

    #[test]
    fn test_factor_rounds() {
        assert_eq!(target_dimensions(&Sizing::Factor(0.5), 101, 51), (51, 26));
        assert_eq!(target_dimensions(&Sizing::Factor(2.0), 3, 4), (6, 8));
        assert_eq!(target_dimensions(&Sizing::Factor(0.0), 300, 200), (0, 0));
        assert_eq!(target_dimensions(&Sizing::Factor(-1.0), 300, 200), (0, 0));
    }

    #[test]
    fn test_explicit_ignores_source() {
        let sizing = Sizing::Explicit { width: 80, height: 24 };
        assert_eq!(target_dimensions(&sizing, 1, 1), (80, 24));
        assert_eq!(target_dimensions(&sizing, 4000, 3000), (80, 24));
    }

    #[test]
    fn test_fit_to_window_reference_case() {
        let (factor, from_bounds) = fit_to_window_factor(2816, 1880, 400, 110, 1.0);
        assert!(from_bounds);
        assert!((factor - 110.0 / 1880.0).abs() < 1e-12);

        let sizing = Sizing::FitToWindow {
            max_width: 400,
            max_height: 110,
            factor: 1.0,
        };
        assert_eq!(target_dimensions(&sizing, 2816, 1880), (165, 110));
    }

    #[test]
    fn test_fit_to_window_never_upscales() {
        // Already fits, a large factor is clamped back to 1.0
        let (factor, from_bounds) = fit_to_window_factor(100, 50, 400, 110, 3.0);
        assert!(!from_bounds);
        assert_eq!(factor, 1.0);

        // A smaller requested factor is kept
        let (factor, from_bounds) = fit_to_window_factor(100, 50, 400, 110, 0.5);
        assert!(!from_bounds);
        assert_eq!(factor, 0.5);
    }

    #[test]
    fn test_fit_to_window_width_bound() {
        let (factor, from_bounds) = fit_to_window_factor(1000, 100, 250, 110, 1.0);
        assert!(from_bounds);
        assert_eq!(factor, 0.25);
        let sizing = Sizing::FitToWindow {
            max_width: 250,
            max_height: 110,
            factor: 1.0,
        };
        assert_eq!(target_dimensions(&sizing, 1000, 100), (250, 25));
    }

    #[test]
    fn test_every_algorithm_fills_target() {
        let src = gradient(37, 23);
        for algorithm in ScalingAlgorithm::ORDER {
            for (w, h) in [(10, 7), (37, 23), (80, 50), (1, 1)] {
                let out = resize_to(&src, w, h, algorithm);
                assert_eq!(out.dimensions(), (w, h), "{algorithm}");
                // Opaque source stays opaque everywhere, including the edges
                assert!(out.pixels().all(|p| p[3] > 60000), "{algorithm} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_identity_nearest_is_exact() {
        let src = gradient(13, 8);
        let out = resize_to(&src, 13, 8, ScalingAlgorithm::NearestNeighbour);
        assert_eq!(out, src);
        let out = resize_to(&src, 13, 8, ScalingAlgorithm::ApproxBilinear);
        assert_eq!(out, src);
    }

    #[test]
    fn test_nearest_upscale_duplicates() {
        let src = Rgba16Image::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 65535])
            } else {
                Rgba([65535, 65535, 65535, 65535])
            }
        });
        let out = resize_to(&src, 4, 2, ScalingAlgorithm::NearestNeighbour);
        for y in 0..2 {
            assert_eq!(out.get_pixel(0, y)[0], 0);
            assert_eq!(out.get_pixel(1, y)[0], 0);
            assert_eq!(out.get_pixel(2, y)[0], 65535);
            assert_eq!(out.get_pixel(3, y)[0], 65535);
        }
    }

    #[test]
    fn test_approx_bilinear_blends_midpoint() {
        let src = Rgba16Image::from_fn(2, 1, |x, _| {
            let v = if x == 0 { 0 } else { 40000 };
            Rgba([v, v, v, 65535])
        });
        // Three columns: centres map to 1/3, 1 and 5/3 source pixels
        let out = resize_to(&src, 3, 1, ScalingAlgorithm::ApproxBilinear);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 20000);
        assert_eq!(out.get_pixel(2, 0)[0], 40000);
    }

    #[test]
    fn test_degenerate_sizes() {
        let src = gradient(10, 10);
        for algorithm in ScalingAlgorithm::ORDER {
            assert_eq!(resize_to(&src, 0, 0, algorithm).dimensions(), (0, 0));
            assert_eq!(resize_to(&src, 0, 5, algorithm).dimensions(), (0, 5));
        }
        let empty = Rgba16Image::new(0, 0);
        let out = resize_to(&empty, 3, 2, ScalingAlgorithm::Bilinear);
        assert_eq!(out.dimensions(), (3, 2));
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_resample_uses_options() {
        let src = gradient(40, 20);
        let options = ScaleOptions {
            sizing: Sizing::Factor(0.5),
            algorithm: ScalingAlgorithm::CatmullRom,
        };
        assert_eq!(resample(&src, &options).dimensions(), (20, 10));
        let options = ScaleOptions::from_raw(7, 3, 1.0).unwrap();
        assert_eq!(resample(&src, &options).dimensions(), (7, 3));
    }
}
